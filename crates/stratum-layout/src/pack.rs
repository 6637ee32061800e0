//! Host-side byte images and the value packer that fills them.
//!
//! A [`StagingBuffer`] is a zeroed byte image exactly `total_bytes` long. Values
//! are written through a descriptor so they land at
//! `element_base + field.byte_offset`, converted to the field's scalar width.
//! A failed write leaves the buffer unchanged.

use std::fmt;

use crate::descriptor::{AllocationRequest, BufferAllocator, BufferLayout};
use crate::error::{LayoutError, LayoutResult};
use crate::index::IndexBufferDescriptor;
use crate::structs::StructBufferDescriptor;
use crate::types::{IndexFormat, ScalarKind};
use crate::vertex::VertexBufferDescriptor;

// ── host values ───────────────────────────────────────────────────────────

/// Numeric values supplied by the host for one field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostValues<'a> {
    F32(&'a [f32]),
    I32(&'a [i32]),
    U32(&'a [u32]),
}

impl HostValues<'_> {
    pub fn len(&self) -> usize {
        match self {
            HostValues::F32(v) => v.len(),
            HostValues::I32(v) => v.len(),
            HostValues::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every f32, i32 and u32 is exactly representable as f64.
    fn get(&self, i: usize) -> f64 {
        match self {
            HostValues::F32(v) => f64::from(v[i]),
            HostValues::I32(v) => f64::from(v[i]),
            HostValues::U32(v) => f64::from(v[i]),
        }
    }
}

macro_rules! host_values_from {
    ($ty:ty, $variant:ident) => {
        impl<'a> From<&'a [$ty]> for HostValues<'a> {
            fn from(v: &'a [$ty]) -> Self {
                HostValues::$variant(v)
            }
        }

        impl<'a, const N: usize> From<&'a [$ty; N]> for HostValues<'a> {
            fn from(v: &'a [$ty; N]) -> Self {
                HostValues::$variant(v)
            }
        }

        impl<'a> From<&'a Vec<$ty>> for HostValues<'a> {
            fn from(v: &'a Vec<$ty>) -> Self {
                HostValues::$variant(v)
            }
        }
    };
}

host_values_from!(f32, F32);
host_values_from!(i32, I32);
host_values_from!(u32, U32);

/// Addresses a vertex field by name or by shader slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldRef<'a> {
    Name(&'a str),
    Slot(u32),
}

impl<'a> From<&'a str> for FieldRef<'a> {
    fn from(name: &'a str) -> Self {
        FieldRef::Name(name)
    }
}

impl From<u32> for FieldRef<'_> {
    fn from(slot: u32) -> Self {
        FieldRef::Slot(slot)
    }
}

impl fmt::Display for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Name(name) => f.write_str(name),
            FieldRef::Slot(slot) => write!(f, "@location({slot})"),
        }
    }
}

// ── scalar encoding ───────────────────────────────────────────────────────

fn integral_in(value: f64, min: f64, max: f64) -> bool {
    value.fract() == 0.0 && value >= min && value <= max
}

fn encode_scalar(field: &str, scalar: ScalarKind, value: f64, out: &mut [u8]) -> LayoutResult<()> {
    let out_of_range = || LayoutError::ValueRange { field: field.to_owned(), value };
    match scalar {
        ScalarKind::F32 => out.copy_from_slice(bytemuck::bytes_of(&(value as f32))),
        ScalarKind::I32 => {
            if !integral_in(value, f64::from(i32::MIN), f64::from(i32::MAX)) {
                return Err(out_of_range());
            }
            out.copy_from_slice(bytemuck::bytes_of(&(value as i32)));
        }
        ScalarKind::U32 => {
            if !integral_in(value, 0.0, f64::from(u32::MAX)) {
                return Err(out_of_range());
            }
            out.copy_from_slice(bytemuck::bytes_of(&(value as u32)));
        }
        ScalarKind::U16 => {
            if !integral_in(value, 0.0, f64::from(u16::MAX)) {
                return Err(out_of_range());
            }
            out.copy_from_slice(bytemuck::bytes_of(&(value as u16)));
        }
        ScalarKind::U8 => {
            if !integral_in(value, 0.0, f64::from(u8::MAX)) {
                return Err(out_of_range());
            }
            out[0] = value as u8;
        }
        ScalarKind::Unorm8 => {
            if value.is_nan() {
                return Err(out_of_range());
            }
            out[0] = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
    }
    Ok(())
}

/// Where one field lands and how its components are spread.
struct Placement<'a> {
    name: &'a str,
    offset: u64,
    size: u32,
    scalar: ScalarKind,
    components: u32,
    /// `(rows, column_stride)` for matrices.
    columns: Option<(u32, u32)>,
}

// ── staging buffer ────────────────────────────────────────────────────────

/// Zero-initialized host image of one buffer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StagingBuffer {
    label: String,
    bytes: Vec<u8>,
}

impl StagingBuffer {
    pub fn new(request: &AllocationRequest<'_>) -> Self {
        Self {
            label: request.label.to_owned(),
            bytes: vec![0; request.total_bytes as usize],
        }
    }

    pub fn for_layout(layout: &impl BufferLayout) -> Self {
        Self::new(&layout.allocation_request())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes a member of a single struct (base offset 0).
    pub fn write_struct<'v>(
        &mut self,
        desc: &StructBufferDescriptor,
        name: &str,
        values: impl Into<HostValues<'v>>,
    ) -> LayoutResult<()> {
        self.write_struct_at(desc, 0, name, values)
    }

    /// Writes a member of the struct instance starting at `instance_base`
    /// (for storage buffers holding several structs back-to-back).
    pub fn write_struct_at<'v>(
        &mut self,
        desc: &StructBufferDescriptor,
        instance_base: u64,
        name: &str,
        values: impl Into<HostValues<'v>>,
    ) -> LayoutResult<()> {
        let field = desc
            .field(name)
            .ok_or_else(|| LayoutError::unknown_field(desc.label(), name))?;

        let offset = instance_base
            .checked_add(u64::from(field.byte_offset))
            .ok_or_else(|| self.past_end(u64::MAX))?;

        self.write(
            Placement {
                name: &field.name,
                offset,
                size: field.byte_size(),
                scalar: field.ty.scalar(),
                components: field.ty.component_count(),
                columns: field
                    .ty
                    .matrix_dims()
                    .zip(field.ty.column_stride())
                    .map(|((_, rows), stride)| (rows, stride)),
            },
            values.into(),
        )
    }

    /// Writes one attribute of vertex (or instance) `element`.
    pub fn write_vertex<'f, 'v>(
        &mut self,
        desc: &VertexBufferDescriptor,
        element: u32,
        field: impl Into<FieldRef<'f>>,
        values: impl Into<HostValues<'v>>,
    ) -> LayoutResult<()> {
        let field_ref = field.into();
        let field = match field_ref {
            FieldRef::Name(name) => desc.field(name),
            FieldRef::Slot(slot) => desc.field_by_slot(slot),
        }
        .ok_or_else(|| LayoutError::unknown_field(desc.label(), field_ref))?;

        if element >= desc.element_count() {
            return Err(LayoutError::OutOfBounds {
                label: desc.label().to_owned(),
                end: desc.element_base(element) + u64::from(desc.stride()),
                len: desc.total_bytes(),
            });
        }

        self.write(
            Placement {
                name: &field.name,
                offset: desc.element_base(element) + u64::from(field.byte_offset),
                size: field.byte_size(),
                scalar: field.format.scalar(),
                components: field.format.component_count(),
                columns: None,
            },
            values.into(),
        )
    }

    /// Writes `indices` starting at index position `first`.
    pub fn write_indices(
        &mut self,
        desc: &IndexBufferDescriptor,
        first: u32,
        indices: &[u32],
    ) -> LayoutResult<()> {
        let width = desc.format().byte_size();
        let start = u64::from(first) * u64::from(width);
        let end = start + indices.len() as u64 * u64::from(width);
        self.check_bounds(end)?;

        let scalar = match desc.format() {
            IndexFormat::Uint16 => ScalarKind::U16,
            IndexFormat::Uint32 => ScalarKind::U32,
        };
        let mut encoded = vec![0u8; (end - start) as usize];
        for (chunk, &index) in encoded.chunks_exact_mut(width as usize).zip(indices) {
            encode_scalar("index", scalar, f64::from(index), chunk)?;
        }
        self.bytes[start as usize..end as usize].copy_from_slice(&encoded);
        Ok(())
    }

    fn check_bounds(&self, end: u64) -> LayoutResult<()> {
        if end > self.bytes.len() as u64 {
            return Err(self.past_end(end));
        }
        Ok(())
    }

    fn past_end(&self, end: u64) -> LayoutError {
        LayoutError::OutOfBounds { label: self.label.clone(), end, len: self.bytes.len() as u64 }
    }

    fn write(&mut self, at: Placement<'_>, values: HostValues<'_>) -> LayoutResult<()> {
        if values.len() != at.components as usize {
            return Err(LayoutError::ValueCount {
                field: at.name.to_owned(),
                expected: at.components,
                got: values.len(),
            });
        }
        let end = at
            .offset
            .checked_add(u64::from(at.size))
            .ok_or_else(|| self.past_end(u64::MAX))?;
        self.check_bounds(end)?;

        // Encode fully before touching the buffer so a bad value writes nothing.
        let width = at.scalar.byte_width();
        let mut encoded = vec![0u8; at.size as usize];
        for i in 0..at.components {
            let pos = match at.columns {
                Some((rows, stride)) => (i / rows) * stride + (i % rows) * width,
                None => i * width,
            } as usize;
            encode_scalar(at.name, at.scalar, values.get(i as usize), &mut encoded[pos..pos + width as usize])?;
        }

        self.bytes[at.offset as usize..end as usize].copy_from_slice(&encoded);
        Ok(())
    }
}

/// Allocates [`StagingBuffer`]s; the host-memory counterpart of a GPU allocator.
#[derive(Debug, Default, Copy, Clone)]
pub struct HostAllocator;

impl BufferAllocator for HostAllocator {
    type Handle = StagingBuffer;

    fn allocate(&self, request: &AllocationRequest<'_>) -> StagingBuffer {
        StagingBuffer::new(request)
    }
}

//! Aligned (uniform/storage struct) layouts.
//!
//! Offsets follow the host-shareable rules a WGSL compiler applies to a struct
//! with the same member order: each member starts at the next multiple of its
//! alignment, and the struct size is rounded to the largest alignment seen.
//! Members are never reordered; order is part of the struct's ABI.

use crate::align::align_up;
use crate::descriptor::{ensure_unique_names, BufferLayout, LayoutBuilder, LayoutMode};
use crate::error::{LayoutError, LayoutResult};
use crate::types::UniformType;
use crate::usage::{BufferUsage, StructUsage};

/// Baseline struct alignment, even for structs of narrower members.
const MIN_STRUCT_ALIGN: u32 = 4;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StructField {
    pub name: String,
    pub ty: UniformType,
    pub byte_offset: u32,
}

impl StructField {
    #[inline]
    pub fn byte_size(&self) -> u32 {
        self.ty.byte_size()
    }

    #[inline]
    pub fn byte_end(&self) -> u32 {
        self.byte_offset + self.byte_size()
    }

    /// Offset in 4-byte words. Every struct member is word-aligned.
    #[inline]
    pub fn word_offset(&self) -> u32 {
        self.byte_offset / 4
    }
}

/// A declared member whose offset is not known yet.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct PendingField {
    name: String,
    ty: UniformType,
}

/// Accumulates members of one uniform/storage struct.
///
/// Offsets are resolved in [`finalize`](Self::finalize), once the whole
/// member list (and therefore the largest alignment) is known.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct StructLayoutBuilder {
    label: String,
    usage: StructUsage,
    fields: Vec<PendingField>,
}

impl StructLayoutBuilder {
    /// Starts a uniform struct.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }

    pub fn begin(label: impl Into<String>, usage: StructUsage) -> Self {
        Self::new(label).usage(usage)
    }

    pub fn usage(mut self, usage: StructUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: UniformType) -> Self {
        self.fields.push(PendingField { name: name.into(), ty });
        self
    }

    /// Like [`field`](Self::field), with the type given as a WGSL tag (`"vec3f"`).
    pub fn try_field(self, name: impl Into<String>, tag: &str) -> LayoutResult<Self> {
        let ty = tag.parse::<UniformType>()?;
        Ok(self.field(name, ty))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn finalize(self) -> LayoutResult<StructBufferDescriptor> {
        if self.label.is_empty() {
            return Err(LayoutError::incomplete(&self.label, "label is empty"));
        }
        if self.fields.is_empty() {
            return Err(LayoutError::incomplete(&self.label, "no fields declared"));
        }
        ensure_unique_names(&self.label, self.fields.iter().map(|f| f.name.as_str()))?;

        let mut cursor = 0u32;
        let mut max_align = MIN_STRUCT_ALIGN;
        let mut fields = Vec::with_capacity(self.fields.len());

        for PendingField { name, ty } in self.fields {
            let align = ty.alignment();
            cursor = align_up(cursor, align);
            log::trace!("{}: {name}: {ty} +{cursor}", self.label);
            fields.push(StructField { name, ty, byte_offset: cursor });
            // Advance by the storage extent, not the alignment.
            cursor += ty.byte_size();
            max_align = max_align.max(align);
        }

        let size = align_up(cursor, max_align);
        log::debug!(
            "finalized struct layout `{}` ({:?}): {} field(s), size {size}, align {max_align}",
            self.label,
            self.usage,
            fields.len()
        );

        Ok(StructBufferDescriptor {
            label: self.label,
            usage: self.usage,
            fields,
            size,
            max_align,
        })
    }
}

impl LayoutBuilder for StructLayoutBuilder {
    type Output = StructBufferDescriptor;

    fn finalize(self) -> LayoutResult<StructBufferDescriptor> {
        StructLayoutBuilder::finalize(self)
    }
}

/// Immutable layout of a uniform/storage struct.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StructBufferDescriptor {
    label: String,
    usage: StructUsage,
    fields: Vec<StructField>,
    size: u32,
    max_align: u32,
}

impl StructBufferDescriptor {
    #[inline]
    pub fn mode(&self) -> LayoutMode {
        LayoutMode::Aligned
    }

    #[inline]
    pub fn struct_usage(&self) -> StructUsage {
        self.usage
    }

    /// Padded struct size in bytes.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn size_words(&self) -> u32 {
        self.size / 4
    }

    /// Largest member alignment, at least 4.
    #[inline]
    pub fn max_align(&self) -> u32 {
        self.max_align
    }

    /// Members in declaration (= memory) order.
    #[inline]
    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn offset_of(&self, name: &str) -> LayoutResult<u32> {
        self.field(name)
            .map(|f| f.byte_offset)
            .ok_or_else(|| LayoutError::unknown_field(&self.label, name))
    }
}

impl BufferLayout for StructBufferDescriptor {
    fn label(&self) -> &str {
        &self.label
    }

    fn total_bytes(&self) -> u64 {
        u64::from(self.size)
    }

    fn usage(&self) -> BufferUsage {
        self.usage.into()
    }
}

//! Sequential (vertex stream) layouts.
//!
//! Attributes are packed back-to-back in declaration order. Nothing is
//! inserted between them; only the final stride is rounded to 4 bytes, which
//! GPU vertex fetch requires.

use crate::align::align_up;
use crate::descriptor::{ensure_unique_names, BufferLayout, LayoutBuilder, LayoutMode};
use crate::error::{LayoutError, LayoutResult};
use crate::types::VertexFormat;
use crate::usage::{BufferUsage, StepMode};

/// What to do when the packed extent is not a multiple of 4.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum StridePolicy {
    /// Round the stride up and log a warning.
    #[default]
    Pad,
    /// Fail with [`LayoutError::UnalignedStride`].
    Reject,
}

/// One attribute of a vertex stream with its resolved offset.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VertexField {
    /// Shader input location. Caller-supplied and not validated.
    pub slot: u32,
    pub name: String,
    pub format: VertexFormat,
    pub byte_offset: u32,
}

impl VertexField {
    #[inline]
    pub fn byte_size(&self) -> u32 {
        self.format.byte_size()
    }

    #[inline]
    pub fn byte_end(&self) -> u32 {
        self.byte_offset + self.byte_size()
    }

    /// Offset in 4-byte words, for indexing `f32`/`u32` staging arrays.
    ///
    /// `None` when a narrow format upstream left this field off a word boundary.
    pub fn word_offset(&self) -> Option<u32> {
        (self.byte_offset % 4 == 0).then_some(self.byte_offset / 4)
    }
}

/// Accumulates attributes of one vertex stream.
///
/// ```
/// use stratum_layout::{BufferLayout, StepMode, VertexFormat, VertexLayoutBuilder};
///
/// let desc = VertexLayoutBuilder::begin("instances", 16, StepMode::Instance)
///     .field(1, "color", VertexFormat::Float32x4)
///     .field(2, "offset", VertexFormat::Float32x2)
///     .finalize()
///     .unwrap();
///
/// assert_eq!(desc.stride(), 24);
/// assert_eq!(desc.total_bytes(), 24 * 16);
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct VertexLayoutBuilder {
    label: String,
    element_count: Option<u32>,
    step_mode: StepMode,
    stride_policy: StridePolicy,
    fields: Vec<VertexField>,
}

impl VertexLayoutBuilder {
    /// Starts a per-vertex stream with no element count yet.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }

    pub fn begin(label: impl Into<String>, element_count: u32, step_mode: StepMode) -> Self {
        Self::new(label).element_count(element_count).step_mode(step_mode)
    }

    /// Number of vertices (or instances) the buffer holds. Does not affect offsets.
    pub fn element_count(mut self, count: u32) -> Self {
        self.element_count = Some(count);
        self
    }

    pub fn step_mode(mut self, step_mode: StepMode) -> Self {
        self.step_mode = step_mode;
        self
    }

    pub fn stride_policy(mut self, policy: StridePolicy) -> Self {
        self.stride_policy = policy;
        self
    }

    /// Appends an attribute directly after the previous one.
    pub fn field(mut self, slot: u32, name: impl Into<String>, format: VertexFormat) -> Self {
        let byte_offset = self.fields.last().map_or(0, VertexField::byte_end);
        self.fields.push(VertexField { slot, name: name.into(), format, byte_offset });
        self
    }

    /// Like [`field`](Self::field), with the format given as a tag (`"float32x3"`).
    pub fn try_field(self, slot: u32, name: impl Into<String>, tag: &str) -> LayoutResult<Self> {
        let format = tag.parse::<VertexFormat>()?;
        Ok(self.field(slot, name, format))
    }

    pub fn fields(&self) -> &[VertexField] {
        &self.fields
    }

    pub fn finalize(self) -> LayoutResult<VertexBufferDescriptor> {
        if self.label.is_empty() {
            return Err(LayoutError::incomplete(&self.label, "label is empty"));
        }
        let Some(last) = self.fields.last() else {
            return Err(LayoutError::incomplete(&self.label, "no fields declared"));
        };
        let element_count = match self.element_count {
            Some(n) if n > 0 => n,
            Some(_) => return Err(LayoutError::incomplete(&self.label, "element count is zero")),
            None => return Err(LayoutError::incomplete(&self.label, "element count not set")),
        };
        ensure_unique_names(&self.label, self.fields.iter().map(|f| f.name.as_str()))?;

        let extent = last.byte_end();
        let stride = if extent % 4 == 0 {
            extent
        } else {
            match self.stride_policy {
                StridePolicy::Pad => {
                    let padded = align_up(extent, 4);
                    log::warn!(
                        "vertex stride of `{}` is {extent} bytes, not a multiple of 4; padding to {padded}",
                        self.label
                    );
                    padded
                }
                StridePolicy::Reject => {
                    return Err(LayoutError::UnalignedStride { label: self.label, extent });
                }
            }
        };

        for f in &self.fields {
            log::trace!("{}: @{} {} {} +{}", self.label, f.slot, f.name, f.format, f.byte_offset);
        }
        log::debug!(
            "finalized vertex layout `{}`: {} field(s), stride {stride}, {element_count} element(s)",
            self.label,
            self.fields.len()
        );

        Ok(VertexBufferDescriptor {
            label: self.label,
            step_mode: self.step_mode,
            element_count,
            stride,
            fields: self.fields,
        })
    }
}

impl LayoutBuilder for VertexLayoutBuilder {
    type Output = VertexBufferDescriptor;

    fn finalize(self) -> LayoutResult<VertexBufferDescriptor> {
        VertexLayoutBuilder::finalize(self)
    }
}

/// Immutable layout of a vertex stream.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VertexBufferDescriptor {
    label: String,
    step_mode: StepMode,
    element_count: u32,
    stride: u32,
    fields: Vec<VertexField>,
}

impl VertexBufferDescriptor {
    #[inline]
    pub fn mode(&self) -> LayoutMode {
        LayoutMode::Sequential
    }

    #[inline]
    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    #[inline]
    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    /// Bytes per element, always a multiple of 4.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn stride_words(&self) -> u32 {
        self.stride / 4
    }

    /// Fields in declaration (= memory) order.
    #[inline]
    pub fn fields(&self) -> &[VertexField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&VertexField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First field bound to `slot`.
    pub fn field_by_slot(&self, slot: u32) -> Option<&VertexField> {
        self.fields.iter().find(|f| f.slot == slot)
    }

    /// Byte offset of `element` within the buffer.
    #[inline]
    pub fn element_base(&self, element: u32) -> u64 {
        u64::from(element) * u64::from(self.stride)
    }

    /// Shape consumed by pipeline setup: attributes plus stride and step mode.
    pub fn binding_layout(&self) -> VertexBindingLayout {
        VertexBindingLayout {
            array_stride: u64::from(self.stride),
            step_mode: self.step_mode,
            attributes: self
                .fields
                .iter()
                .map(|f| VertexAttributeBinding {
                    slot: f.slot,
                    format: f.format,
                    byte_offset: u64::from(f.byte_offset),
                })
                .collect(),
        }
    }
}

impl BufferLayout for VertexBufferDescriptor {
    fn label(&self) -> &str {
        &self.label
    }

    fn total_bytes(&self) -> u64 {
        u64::from(self.stride) * u64::from(self.element_count)
    }

    fn usage(&self) -> BufferUsage {
        BufferUsage::Vertex
    }
}

/// One attribute as pipeline setup sees it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexAttributeBinding {
    pub slot: u32,
    pub format: VertexFormat,
    pub byte_offset: u64,
}

/// Binding-layout projection of a [`VertexBufferDescriptor`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VertexBindingLayout {
    pub array_stride: u64,
    pub step_mode: StepMode,
    pub attributes: Vec<VertexAttributeBinding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use VertexFormat::*;

    fn offsets(desc: &VertexBufferDescriptor) -> Vec<u32> {
        desc.fields().iter().map(|f| f.byte_offset).collect()
    }

    // ── offsets ───────────────────────────────────────────────────────────

    #[test]
    fn fields_pack_without_gaps() {
        let desc = VertexLayoutBuilder::begin("v", 3, StepMode::Vertex)
            .field(0, "pos", Float32x3)
            .field(1, "uv", Float32x2)
            .field(2, "color", Unorm8x4)
            .field(3, "id", Uint32)
            .finalize()
            .unwrap();

        assert_eq!(offsets(&desc), vec![0, 12, 20, 24]);
        assert_eq!(desc.stride(), 28);
        assert_eq!(desc.total_bytes(), 84);
    }

    #[test]
    fn offsets_resolve_while_adding() {
        let builder = VertexLayoutBuilder::new("v")
            .field(0, "a", Float32x4)
            .field(1, "b", Float32x2);
        let got: Vec<u32> = builder.fields().iter().map(|f| f.byte_offset).collect();
        assert_eq!(got, vec![0, 16]);
    }

    #[test]
    fn slots_are_not_validated() {
        let desc = VertexLayoutBuilder::begin("v", 1, StepMode::Vertex)
            .field(5, "a", Float32)
            .field(5, "b", Float32)
            .field(0, "c", Float32)
            .finalize()
            .unwrap();
        assert_eq!(offsets(&desc), vec![0, 4, 8]);
        assert_eq!(desc.field_by_slot(5).map(|f| f.name.as_str()), Some("a"));
    }

    #[test]
    fn word_offsets_follow_byte_offsets() {
        let desc = VertexLayoutBuilder::begin("v", 1, StepMode::Vertex)
            .field(0, "tag", Uint8x2)
            .field(1, "pos", Float32x2)
            .finalize()
            .unwrap();
        assert_eq!(desc.fields()[0].word_offset(), Some(0));
        assert_eq!(desc.fields()[1].word_offset(), None);
    }

    // ── stride ────────────────────────────────────────────────────────────

    #[test]
    fn aligned_extent_is_the_stride() {
        let desc = VertexLayoutBuilder::begin("v", 4, StepMode::Vertex)
            .field(0, "pos", Float32x3)
            .finalize()
            .unwrap();
        assert_eq!(desc.stride(), 12);
        assert_eq!(desc.stride_words(), 3);
    }

    #[test]
    fn unaligned_extent_is_padded() {
        let desc = VertexLayoutBuilder::begin("v", 10, StepMode::Vertex)
            .field(0, "pos", Float32x2)
            .field(1, "flags", Uint8x2)
            .finalize()
            .unwrap();
        assert_eq!(desc.stride(), 12);
        assert_eq!(desc.total_bytes(), 120);
    }

    #[test]
    fn unaligned_extent_rejected_under_strict_policy() {
        let err = VertexLayoutBuilder::begin("strict", 1, StepMode::Vertex)
            .stride_policy(StridePolicy::Reject)
            .field(0, "flags", Uint8x2)
            .finalize()
            .unwrap_err();
        assert_eq!(err, LayoutError::UnalignedStride { label: "strict".into(), extent: 2 });
    }

    // ── incomplete ────────────────────────────────────────────────────────

    #[test]
    fn empty_field_list_is_incomplete() {
        let err = VertexLayoutBuilder::begin("v", 1, StepMode::Vertex).finalize().unwrap_err();
        assert!(matches!(err, LayoutError::IncompleteDescriptor { .. }));
    }

    #[test]
    fn missing_or_zero_count_is_incomplete() {
        let unset = VertexLayoutBuilder::new("v").field(0, "a", Float32).finalize();
        assert!(matches!(unset, Err(LayoutError::IncompleteDescriptor { .. })));

        let zero = VertexLayoutBuilder::begin("v", 0, StepMode::Vertex)
            .field(0, "a", Float32)
            .finalize();
        assert!(matches!(zero, Err(LayoutError::IncompleteDescriptor { .. })));
    }

    #[test]
    fn empty_label_is_incomplete() {
        let err = VertexLayoutBuilder::begin("", 1, StepMode::Vertex)
            .field(0, "a", Float32)
            .finalize()
            .unwrap_err();
        assert!(matches!(err, LayoutError::IncompleteDescriptor { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = VertexLayoutBuilder::begin("v", 1, StepMode::Vertex)
            .field(0, "a", Float32)
            .field(1, "a", Float32x2)
            .finalize()
            .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateField { label: "v".into(), name: "a".into() });
    }

    #[test]
    fn unknown_tag_fails_before_any_offset() {
        let err = VertexLayoutBuilder::new("v").try_field(0, "x", "arrayOfF32").unwrap_err();
        assert_eq!(err, LayoutError::UnsupportedType { tag: "arrayOfF32".into() });
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn binding_layout_mirrors_descriptor() {
        let desc = VertexLayoutBuilder::begin("inst", 2, StepMode::Instance)
            .field(1, "color", Float32x4)
            .field(4, "offset", Float32x2)
            .finalize()
            .unwrap();

        let layout = desc.binding_layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, StepMode::Instance);
        assert_eq!(
            layout.attributes,
            vec![
                VertexAttributeBinding { slot: 1, format: Float32x4, byte_offset: 0 },
                VertexAttributeBinding { slot: 4, format: Float32x2, byte_offset: 16 },
            ]
        );
    }

    #[test]
    fn allocation_request_uses_vertex_usage() {
        let desc = VertexLayoutBuilder::begin("quad", 4, StepMode::Vertex)
            .field(0, "pos", Float32x2)
            .finalize()
            .unwrap();
        let req = desc.allocation_request();
        assert_eq!(req.label, "quad");
        assert_eq!(req.total_bytes, 32);
        assert_eq!(req.usage, BufferUsage::Vertex);
    }
}

use crate::descriptor::{BufferLayout, LayoutBuilder};
use crate::error::{LayoutError, LayoutResult};
use crate::types::IndexFormat;
use crate::usage::BufferUsage;

/// Size arithmetic for a flat index buffer.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct IndexLayoutBuilder {
    label: String,
    count: u32,
    format: IndexFormat,
}

impl IndexLayoutBuilder {
    pub fn new(label: impl Into<String>, count: u32, format: IndexFormat) -> Self {
        Self { label: label.into(), count, format }
    }

    /// Like [`new`](Self::new), with the format given as a tag (`"uint16"`).
    pub fn try_new(label: impl Into<String>, count: u32, tag: &str) -> LayoutResult<Self> {
        Ok(Self::new(label, count, tag.parse()?))
    }

    pub fn finalize(self) -> LayoutResult<IndexBufferDescriptor> {
        if self.label.is_empty() {
            return Err(LayoutError::incomplete(&self.label, "label is empty"));
        }
        if self.count == 0 {
            return Err(LayoutError::incomplete(&self.label, "index count is zero"));
        }
        log::debug!(
            "finalized index layout `{}`: {} x {}",
            self.label,
            self.count,
            self.format
        );
        Ok(IndexBufferDescriptor { label: self.label, count: self.count, format: self.format })
    }
}

impl LayoutBuilder for IndexLayoutBuilder {
    type Output = IndexBufferDescriptor;

    fn finalize(self) -> LayoutResult<IndexBufferDescriptor> {
        IndexLayoutBuilder::finalize(self)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct IndexBufferDescriptor {
    label: String,
    count: u32,
    format: IndexFormat,
}

impl IndexBufferDescriptor {
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn format(&self) -> IndexFormat {
        self.format
    }
}

impl BufferLayout for IndexBufferDescriptor {
    fn label(&self) -> &str {
        &self.label
    }

    fn total_bytes(&self) -> u64 {
        u64::from(self.format.byte_size()) * u64::from(self.count)
    }

    fn usage(&self) -> BufferUsage {
        BufferUsage::Index
    }
}

//! Boundary between finalized layouts and whoever provides backing storage.

use std::collections::HashSet;

use crate::error::{LayoutError, LayoutResult};
use crate::usage::BufferUsage;

/// Packing rule a descriptor was built with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LayoutMode {
    /// Fields back-to-back, stride padded to 4 bytes (vertex streams).
    Sequential,
    /// Fields padded to their alignment, size padded to the largest one (structs).
    Aligned,
}

/// Everything an allocator needs to know to back a descriptor.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AllocationRequest<'a> {
    pub label: &'a str,
    pub total_bytes: u64,
    pub usage: BufferUsage,
}

/// Common view over every finalized descriptor.
pub trait BufferLayout {
    fn label(&self) -> &str;

    /// Minimum size of the backing storage.
    fn total_bytes(&self) -> u64;

    fn usage(&self) -> BufferUsage;

    fn allocation_request(&self) -> AllocationRequest<'_> {
        AllocationRequest {
            label: self.label(),
            total_bytes: self.total_bytes(),
            usage: self.usage(),
        }
    }
}

/// Provides storage of at least `total_bytes`, writable at any offset in range.
pub trait BufferAllocator {
    type Handle;

    fn allocate(&self, request: &AllocationRequest<'_>) -> Self::Handle;

    fn allocate_for(&self, layout: &impl BufferLayout) -> Self::Handle {
        self.allocate(&layout.allocation_request())
    }
}

/// A single-use accumulator that produces one immutable descriptor.
///
/// Builders are plain values (`Clone + Eq + Hash`) so a builder doubles as the
/// schema identity in [`LayoutCache`](crate::LayoutCache).
pub trait LayoutBuilder {
    type Output;

    fn finalize(self) -> LayoutResult<Self::Output>;
}

/// Rejects a field list in which two fields share a name.
pub(crate) fn ensure_unique_names<'a>(
    label: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> LayoutResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(LayoutError::DuplicateField {
                label: label.to_owned(),
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

//! Bridges stratum layouts to wgpu buffers.
//!
//! - [`convert`]: enum mappings into wgpu types
//! - [`GpuAllocator`]: `BufferAllocator` over a `wgpu::Device`
//! - [`OwnedVertexLayout`]: vertex binding projection as a `wgpu::VertexBufferLayout`
//! - [`upload`]: copies a `StagingBuffer` into a GPU buffer

mod allocator;
pub mod convert;
mod vertex_layout;

pub use allocator::{upload, GpuAllocator};
pub use vertex_layout::OwnedVertexLayout;

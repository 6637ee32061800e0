//! Buffer layout compiler for GPU data.
//!
//! Given an ordered list of typed fields, computes byte offsets, stride, and
//! total size following the packing rules GPUs expect, then helps write host
//! values into a raw byte image at those offsets.
//!
//! This crate has no GPU dependency; it only produces descriptors. Allocation
//! and upload live in `stratum-engine`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | `VertexFormat`, `UniformType`, `IndexFormat`, tag oracle |
//! | [`vertex`] | sequential builder, `VertexBufferDescriptor`, binding projection |
//! | [`structs`] | aligned builder, `StructBufferDescriptor` |
//! | [`index`] | index buffer sizing |
//! | [`pack`] | `StagingBuffer` value packer, `HostAllocator` |
//! | [`cache`] | `LayoutCache` |
//!
//! # Quick start
//!
//! ```rust
//! use stratum_layout::{StagingBuffer, StructLayoutBuilder, UniformType};
//!
//! let desc = StructLayoutBuilder::new("colors")
//!     .field("color1", UniformType::Vec4f)
//!     .field("color2", UniformType::Vec4f)
//!     .field("offset", UniformType::Vec2f)
//!     .finalize()
//!     .unwrap();
//!
//! assert_eq!(desc.size(), 48);
//!
//! let mut image = StagingBuffer::for_layout(&desc);
//! image.write_struct(&desc, "offset", &[0.25f32, -0.5]).unwrap();
//! ```

mod align;
pub mod cache;
pub mod descriptor;
pub mod error;
pub mod index;
pub mod pack;
pub mod structs;
pub mod types;
pub mod usage;
pub mod vertex;

pub use align::align_up;
pub use cache::LayoutCache;
pub use descriptor::{AllocationRequest, BufferAllocator, BufferLayout, LayoutBuilder, LayoutMode};
pub use error::{LayoutError, LayoutResult};
pub use index::{IndexBufferDescriptor, IndexLayoutBuilder};
pub use pack::{FieldRef, HostAllocator, HostValues, StagingBuffer};
pub use structs::{StructBufferDescriptor, StructField, StructLayoutBuilder};
pub use types::{alignment, byte_size, IndexFormat, ScalarKind, UniformType, VertexFormat};
pub use usage::{BufferUsage, StepMode, StructUsage};
pub use vertex::{
    StridePolicy, VertexAttributeBinding, VertexBindingLayout, VertexBufferDescriptor, VertexField,
    VertexLayoutBuilder,
};

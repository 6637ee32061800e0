//! Stratum engine crate.
//!
//! This crate owns the wgpu side of stratum: device acquisition, buffer
//! allocation from layout descriptors, and uploads of staging images.

pub mod buffers;
pub mod device;
pub mod logging;

pub use buffers::{upload, GpuAllocator, OwnedVertexLayout};
pub use device::{Gpu, GpuInit};

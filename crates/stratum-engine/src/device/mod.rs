//! GPU device management.
//!
//! This module creates the wgpu Instance/Adapter/Device/Queue. No surface is
//! involved: layouts are uploaded into buffers, presentation is someone else's job.

mod gpu;
mod init;

pub use gpu::Gpu;
pub use init::GpuInit;

use anyhow::{ensure, Result};
use stratum_layout::{AllocationRequest, BufferAllocator, StagingBuffer};

use super::convert::buffer_usages;

/// Creates wgpu buffers sized and flagged from layout descriptors.
#[derive(Clone, Copy)]
pub struct GpuAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> GpuAllocator<'a> {
    #[inline]
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }
}

impl BufferAllocator for GpuAllocator<'_> {
    type Handle = wgpu::Buffer;

    fn allocate(&self, request: &AllocationRequest<'_>) -> wgpu::Buffer {
        log::debug!(
            "allocating `{}`: {} bytes as {}",
            request.label,
            request.total_bytes,
            request.usage
        );
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(request.label),
            size: request.total_bytes,
            usage: buffer_usages(request.usage),
            mapped_at_creation: false,
        })
    }
}

/// Copies `staging` into the start of `buffer` via the queue.
///
/// Fails if the buffer is smaller than the staging image.
pub fn upload(queue: &wgpu::Queue, buffer: &wgpu::Buffer, staging: &StagingBuffer) -> Result<()> {
    let len = staging.len() as u64;
    ensure!(
        len <= buffer.size(),
        "staging image `{}` ({len} bytes) does not fit buffer of {} bytes",
        staging.label(),
        buffer.size()
    );
    ensure!(
        len % wgpu::COPY_BUFFER_ALIGNMENT == 0,
        "staging image `{}` is {len} bytes, not a multiple of {}",
        staging.label(),
        wgpu::COPY_BUFFER_ALIGNMENT
    );
    queue.write_buffer(buffer, 0, staging.as_bytes());
    Ok(())
}

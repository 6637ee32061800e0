use anyhow::Result;
use stratum_engine::logging::{init_logging, LoggingConfig};
use stratum_engine::{upload, Gpu, GpuAllocator, GpuInit, OwnedVertexLayout};
use stratum_layout::{BufferAllocator, BufferLayout, LayoutCache};

mod scene;

use scene::{Filled, SceneConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let structs = LayoutCache::new();
    let scene = scene::build(&SceneConfig::default(), &structs)?;

    for desc in [&*scene.projection.desc, &*scene.grid.desc] {
        log::info!("struct `{}`: {} bytes, align {}", desc.label(), desc.size(), desc.max_align());
        for f in desc.fields() {
            log::info!("  {:<12} {:<8} +{:<4} (word {})", f.name, f.ty, f.byte_offset, f.word_offset());
        }
    }

    let streams = [&*scene.vertices.desc, &*scene.instances.desc];
    let vertex_layouts: Vec<OwnedVertexLayout> =
        streams.iter().map(|d| OwnedVertexLayout::from(&d.binding_layout())).collect();
    for (desc, owned) in streams.iter().zip(&vertex_layouts) {
        log::info!(
            "stream `{}`: stride {}, {:?}, {} element(s)",
            desc.label(),
            desc.stride(),
            owned.step_mode,
            desc.element_count()
        );
        for a in &owned.attributes {
            log::info!("  @location({}) {:?} +{}", a.shader_location, a.format, a.offset);
        }
    }

    let gpu = match Gpu::new_blocking(GpuInit::default()) {
        Ok(gpu) => gpu,
        Err(err) => {
            log::warn!("no GPU available ({err:#}); layouts computed, upload skipped");
            return Ok(());
        }
    };

    let allocator = GpuAllocator::new(gpu.device());
    let queue = gpu.queue();

    let _vertex_buffer = allocate_and_upload(&allocator, queue, &scene.vertices)?;
    let _instance_buffer = allocate_and_upload(&allocator, queue, &scene.instances)?;
    let _projection_buffer = allocate_and_upload(&allocator, queue, &scene.projection)?;
    let _grid_buffer = allocate_and_upload(&allocator, queue, &scene.grid)?;
    let _index_buffer = allocate_and_upload(&allocator, queue, &scene.indices)?;

    queue.submit(std::iter::empty());
    log::info!("uploaded 5 buffers to {}", gpu.adapter_info().name);
    Ok(())
}

fn allocate_and_upload<D: BufferLayout>(
    allocator: &GpuAllocator<'_>,
    queue: &wgpu::Queue,
    filled: &Filled<D>,
) -> Result<wgpu::Buffer> {
    let buffer = allocator.allocate_for(filled.desc.as_ref());
    upload(queue, &buffer, &filled.image)?;
    Ok(buffer)
}

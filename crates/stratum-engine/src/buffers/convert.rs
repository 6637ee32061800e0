use stratum_layout::{BufferUsage, IndexFormat, StepMode, VertexFormat};

pub fn vertex_format(format: VertexFormat) -> wgpu::VertexFormat {
    match format {
        VertexFormat::Uint8x2 => wgpu::VertexFormat::Uint8x2,
        VertexFormat::Uint8x4 => wgpu::VertexFormat::Uint8x4,
        VertexFormat::Unorm8x2 => wgpu::VertexFormat::Unorm8x2,
        VertexFormat::Unorm8x4 => wgpu::VertexFormat::Unorm8x4,
        VertexFormat::Uint16x2 => wgpu::VertexFormat::Uint16x2,
        VertexFormat::Uint16x4 => wgpu::VertexFormat::Uint16x4,
        VertexFormat::Uint32 => wgpu::VertexFormat::Uint32,
        VertexFormat::Uint32x2 => wgpu::VertexFormat::Uint32x2,
        VertexFormat::Uint32x3 => wgpu::VertexFormat::Uint32x3,
        VertexFormat::Uint32x4 => wgpu::VertexFormat::Uint32x4,
        VertexFormat::Sint32 => wgpu::VertexFormat::Sint32,
        VertexFormat::Sint32x2 => wgpu::VertexFormat::Sint32x2,
        VertexFormat::Sint32x3 => wgpu::VertexFormat::Sint32x3,
        VertexFormat::Sint32x4 => wgpu::VertexFormat::Sint32x4,
        VertexFormat::Float32 => wgpu::VertexFormat::Float32,
        VertexFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
        VertexFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
        VertexFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
    }
}

pub fn step_mode(mode: StepMode) -> wgpu::VertexStepMode {
    match mode {
        StepMode::Vertex => wgpu::VertexStepMode::Vertex,
        StepMode::Instance => wgpu::VertexStepMode::Instance,
    }
}

pub fn index_format(format: IndexFormat) -> wgpu::IndexFormat {
    match format {
        IndexFormat::Uint16 => wgpu::IndexFormat::Uint16,
        IndexFormat::Uint32 => wgpu::IndexFormat::Uint32,
    }
}

/// Usage flags for a buffer that is filled from the host with `write_buffer`.
pub fn buffer_usages(usage: BufferUsage) -> wgpu::BufferUsages {
    let binding = match usage {
        BufferUsage::Vertex => wgpu::BufferUsages::VERTEX,
        BufferUsage::Index => wgpu::BufferUsages::INDEX,
        BufferUsage::Uniform => wgpu::BufferUsages::UNIFORM,
        BufferUsage::Storage | BufferUsage::ReadOnlyStorage => wgpu::BufferUsages::STORAGE,
    };
    binding | wgpu::BufferUsages::COPY_DST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_format_sizes_agree_with_wgpu() {
        for f in VertexFormat::ALL {
            assert_eq!(u64::from(f.byte_size()), vertex_format(f).size(), "{f}");
        }
    }

    #[test]
    fn index_format_sizes_agree_with_wgpu() {
        for f in [IndexFormat::Uint16, IndexFormat::Uint32] {
            assert_eq!(u64::from(f.byte_size()), index_format(f).byte_size() as u64);
        }
    }

    #[test]
    fn every_usage_is_copy_dst() {
        for usage in [
            BufferUsage::Vertex,
            BufferUsage::Index,
            BufferUsage::Uniform,
            BufferUsage::Storage,
            BufferUsage::ReadOnlyStorage,
        ] {
            assert!(buffer_usages(usage).contains(wgpu::BufferUsages::COPY_DST));
        }
        assert_eq!(
            buffer_usages(BufferUsage::ReadOnlyStorage),
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST
        );
    }

    #[test]
    fn step_modes_map_one_to_one() {
        assert_eq!(step_mode(StepMode::Vertex), wgpu::VertexStepMode::Vertex);
        assert_eq!(step_mode(StepMode::Instance), wgpu::VertexStepMode::Instance);
    }
}

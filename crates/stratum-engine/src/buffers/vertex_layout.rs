use stratum_layout::VertexBindingLayout;

use super::convert::{step_mode, vertex_format};

/// A vertex buffer layout that owns its attribute list.
///
/// `wgpu::VertexBufferLayout` borrows its attributes, so layouts built at
/// runtime keep them here and lend them out per pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedVertexLayout {
    pub array_stride: wgpu::BufferAddress,
    pub step_mode: wgpu::VertexStepMode,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

impl OwnedVertexLayout {
    pub fn layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: self.step_mode,
            attributes: &self.attributes,
        }
    }
}

impl From<&VertexBindingLayout> for OwnedVertexLayout {
    fn from(binding: &VertexBindingLayout) -> Self {
        Self {
            array_stride: binding.array_stride,
            step_mode: step_mode(binding.step_mode),
            attributes: binding
                .attributes
                .iter()
                .map(|a| wgpu::VertexAttribute {
                    format: vertex_format(a.format),
                    offset: a.byte_offset,
                    shader_location: a.slot,
                })
                .collect(),
        }
    }
}

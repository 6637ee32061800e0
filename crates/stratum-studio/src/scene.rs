//! Buffers of the instanced cube scene: one vertex stream, one instance
//! stream, two uniform structs, and an index buffer.

use std::sync::Arc;

use anyhow::Result;
use stratum_layout::{
    IndexBufferDescriptor, IndexFormat, IndexLayoutBuilder, LayoutCache, StagingBuffer, StepMode,
    StructBufferDescriptor, StructLayoutBuilder, UniformType, VertexBufferDescriptor,
    VertexFormat, VertexLayoutBuilder,
};

const HALF_EXTENT: f32 = 50.0;

#[rustfmt::skip]
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [ 1.0,  1.0,  1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [-1.0,  1.0,  1.0],
    [ 1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
];

#[rustfmt::skip]
const CUBE_INDICES: [u32; 36] = [
    0, 1, 2,  0, 3, 1, // front
    4, 5, 6,  4, 7, 5, // back
    4, 2, 6,  4, 0, 2, // right
    7, 1, 5,  7, 3, 1, // left
    4, 3, 0,  4, 7, 3, // top
    6, 1, 2,  6, 5, 1, // bottom
];

/// Orthographic depth range.
const NEAR: f32 = 1.0;
const FAR: f32 = 1000.0;

pub struct SceneConfig {
    pub instances: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub grid_scale: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { instances: 16, canvas_width: 800.0, canvas_height: 600.0, grid_scale: 8 }
    }
}

/// A finalized layout together with its filled host image.
pub struct Filled<D> {
    pub desc: Arc<D>,
    pub image: StagingBuffer,
}

pub struct Scene {
    pub vertices: Filled<VertexBufferDescriptor>,
    pub instances: Filled<VertexBufferDescriptor>,
    pub projection: Filled<StructBufferDescriptor>,
    pub grid: Filled<StructBufferDescriptor>,
    pub indices: Filled<IndexBufferDescriptor>,
}

pub fn projection_layout() -> StructLayoutBuilder {
    StructLayoutBuilder::new("projection uniforms")
        .field("ndc", UniformType::Mat4x4f)
        .field("fudge", UniformType::F32)
        .field("translation", UniformType::Mat4x4f)
        .field("rotation", UniformType::Mat4x4f)
}

pub fn grid_layout() -> StructLayoutBuilder {
    StructLayoutBuilder::new("grid uniforms").field("grid_scale", UniformType::U32)
}

pub fn instance_layout(count: u32) -> VertexLayoutBuilder {
    VertexLayoutBuilder::begin("instance buffer", count, StepMode::Instance)
        .field(1, "color1", VertexFormat::Float32x4)
        .field(2, "color2", VertexFormat::Float32x4)
        .field(3, "scale", VertexFormat::Float32x2)
        .field(4, "offset", VertexFormat::Float32x2)
}

#[rustfmt::skip]
fn ndc_matrix(width: f32, height: f32) -> [f32; 16] {
    [
        2.0 / width, 0.0,           0.0,                 0.0,
        0.0,         -2.0 / height, 0.0,                 0.0,
        0.0,         0.0,           1.0 / (FAR - NEAR),  0.0,
        0.0,         0.0,           -NEAR / (FAR - NEAR), 1.0,
    ]
}

#[rustfmt::skip]
fn translation_matrix(x: f32) -> [f32; 16] {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        x,   0.0, 0.0, 1.0,
    ]
}

#[rustfmt::skip]
fn rotation_z(angle: f32) -> [f32; 16] {
    let (s, c) = angle.sin_cos();
    [
        c,   s,   0.0, 0.0,
        -s,  c,   0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// Deterministic stand-in for random per-instance values, in `[0, 1)`.
fn hash01(seed: u32) -> f32 {
    let x = seed.wrapping_mul(0x9E37_79B9).rotate_left(13).wrapping_mul(0x85EB_CA6B);
    (x >> 8) as f32 / (1u32 << 24) as f32
}

pub fn build(config: &SceneConfig, structs: &LayoutCache<StructLayoutBuilder>) -> Result<Scene> {
    // Vertex stream: cube corners.
    let desc = Arc::new(
        VertexLayoutBuilder::begin("cube vertex buffer", CUBE_CORNERS.len() as u32, StepMode::Vertex)
            .field(0, "position", VertexFormat::Float32x3)
            .finalize()?,
    );
    let mut image = StagingBuffer::for_layout(desc.as_ref());
    for (i, corner) in CUBE_CORNERS.iter().enumerate() {
        let p = corner.map(|c| c * HALF_EXTENT);
        image.write_vertex(&desc, i as u32, "position", &p)?;
    }
    let vertices = Filled { desc, image };

    // Instance stream.
    let desc = Arc::new(instance_layout(config.instances).finalize()?);
    let mut image = StagingBuffer::for_layout(desc.as_ref());
    for i in 0..config.instances {
        let seed = i * 4;
        let scale = 0.1 + 0.9 * hash01(seed + 3);
        image.write_vertex(&desc, i, "color1", &[hash01(seed), hash01(seed + 1), 0.0, 1.0])?;
        image.write_vertex(&desc, i, "color2", &[hash01(seed + 1), hash01(seed), 0.0, 1.0])?;
        image.write_vertex(&desc, i, "scale", &[scale, scale])?;
        image.write_vertex(
            &desc,
            i,
            "offset",
            &[hash01(seed + 2) * 1.8 - 0.9, hash01(seed + 5) * 1.8 - 0.9],
        )?;
    }
    let instances = Filled { desc, image };

    // Projection uniforms.
    let desc = structs.get_or_finalize(projection_layout())?;
    let mut image = StagingBuffer::for_layout(desc.as_ref());
    image.write_struct(&desc, "ndc", &ndc_matrix(config.canvas_width, config.canvas_height))?;
    image.write_struct(&desc, "fudge", &[2.0f32])?;
    image.write_struct(&desc, "translation", &translation_matrix(100.0))?;
    image.write_struct(&desc, "rotation", &rotation_z(0.0))?;
    let projection = Filled { desc, image };

    // Grid uniforms.
    let desc = structs.get_or_finalize(grid_layout())?;
    let mut image = StagingBuffer::for_layout(desc.as_ref());
    image.write_struct(&desc, "grid_scale", &[config.grid_scale])?;
    let grid = Filled { desc, image };

    // Indices.
    let desc = Arc::new(
        IndexLayoutBuilder::new("index buffer", CUBE_INDICES.len() as u32, IndexFormat::Uint32)
            .finalize()?,
    );
    let mut image = StagingBuffer::for_layout(desc.as_ref());
    image.write_indices(&desc, 0, &CUBE_INDICES)?;
    let indices = Filled { desc, image };

    Ok(Scene { vertices, instances, projection, grid, indices })
}

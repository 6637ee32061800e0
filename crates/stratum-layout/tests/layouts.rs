//! Layout scenarios, including the buffers of the playground scene.

use stratum_layout::{
    align_up, alignment, byte_size, BufferLayout, BufferUsage, IndexFormat, IndexLayoutBuilder,
    LayoutError, LayoutMode, StagingBuffer, StepMode, StructBufferDescriptor, StructLayoutBuilder,
    UniformType, VertexBufferDescriptor, VertexFormat, VertexLayoutBuilder,
};

fn struct_offsets(fields: &[(&str, UniformType)]) -> (Vec<u32>, u32) {
    let desc = fields
        .iter()
        .fold(StructLayoutBuilder::new("s"), |b, &(n, t)| b.field(n, t))
        .finalize()
        .unwrap();
    (desc.fields().iter().map(|f| f.byte_offset).collect(), desc.size())
}

// ── scenarios ─────────────────────────────────────────────────────────────

#[test]
fn two_colors_and_an_offset() {
    let (offsets, size) = struct_offsets(&[
        ("color1", UniformType::Vec4f),
        ("color2", UniformType::Vec4f),
        ("offset", UniformType::Vec2f),
    ]);
    assert_eq!(offsets, vec![0, 16, 32]);
    // 40 bytes of members, padded to the 16-byte struct alignment.
    assert_eq!(size, 48);
}

#[test]
fn single_position_stream() {
    let desc = VertexLayoutBuilder::begin("quad", 4, StepMode::Vertex)
        .field(0, "position", VertexFormat::Float32x2)
        .finalize()
        .unwrap();
    assert_eq!(desc.stride(), 8);
    assert_eq!(desc.total_bytes(), 32);
    assert_eq!(desc.mode(), LayoutMode::Sequential);
}

#[test]
fn scalar_then_vec3() {
    let (offsets, size) = struct_offsets(&[("scalar", UniformType::U32), ("vec", UniformType::Vec3f)]);
    assert_eq!(offsets, vec![0, 16]);
    assert_eq!(size, 32);
}

#[test]
fn array_tags_are_unsupported() {
    let err = StructLayoutBuilder::new("s").try_field("xs", "arrayOfF32").unwrap_err();
    assert_eq!(err, LayoutError::UnsupportedType { tag: "arrayOfF32".into() });
    assert!(byte_size("array<f32, 4>").is_err());
}

#[test]
fn finalize_without_fields_fails() {
    let err = StructLayoutBuilder::new("s").finalize().unwrap_err();
    assert!(matches!(err, LayoutError::IncompleteDescriptor { .. }));
    let err = VertexLayoutBuilder::begin("v", 3, StepMode::Vertex).finalize().unwrap_err();
    assert!(matches!(err, LayoutError::IncompleteDescriptor { .. }));
}

// ── properties ────────────────────────────────────────────────────────────

fn aligned(types: &[UniformType]) -> StructBufferDescriptor {
    types
        .iter()
        .enumerate()
        .fold(StructLayoutBuilder::new("s"), |b, (i, &t)| b.field(format!("f{i}"), t))
        .finalize()
        .unwrap()
}

fn sequential(formats: &[VertexFormat]) -> VertexBufferDescriptor {
    formats
        .iter()
        .enumerate()
        .fold(VertexLayoutBuilder::begin("v", 5, StepMode::Vertex), |b, (i, &f)| {
            b.field(i as u32, format!("a{i}"), f)
        })
        .finalize()
        .unwrap()
}

fn assert_aligned_properties(desc: &StructBufferDescriptor) {
    let fields = desc.fields();
    assert_eq!(fields[0].byte_offset, 0, "{fields:?}");

    for pair in fields.windows(2) {
        assert!(pair[1].byte_offset >= pair[0].byte_end(), "{fields:?}");
        // Smallest aligned offset past the previous member.
        assert!(pair[1].byte_offset - pair[0].byte_end() < pair[1].ty.alignment(), "{fields:?}");
    }

    let mut max_align = 4;
    for f in fields {
        assert_eq!(f.byte_offset % f.ty.alignment(), 0, "{fields:?}");
        max_align = max_align.max(f.ty.alignment());
    }
    assert_eq!(desc.max_align(), max_align);

    let last_end = fields[fields.len() - 1].byte_end();
    assert_eq!(desc.size(), align_up(last_end, max_align), "{fields:?}");
}

fn assert_sequential_properties(desc: &VertexBufferDescriptor) {
    let mut expected = 0;
    for f in desc.fields() {
        assert_eq!(f.byte_offset, expected, "{:?}", desc.fields());
        expected += f.format.byte_size();
    }
    assert_eq!(desc.stride(), align_up(expected, 4));
    assert_eq!(desc.total_bytes(), u64::from(desc.stride()) * 5);
}

#[test]
fn aligned_properties_hold_for_a_mixed_struct() {
    let desc = aligned(&[
        UniformType::F32,
        UniformType::Vec3f,
        UniformType::Vec2u,
        UniformType::Mat3x3f,
        UniformType::I32,
        UniformType::Vec2f,
        UniformType::Mat2x2f,
        UniformType::U32,
    ]);
    assert_aligned_properties(&desc);
}

#[test]
fn aligned_properties_hold_for_every_triple() {
    for a in UniformType::ALL {
        assert_aligned_properties(&aligned(&[a]));
        for b in UniformType::ALL {
            assert_aligned_properties(&aligned(&[a, b]));
            for c in UniformType::ALL {
                assert_aligned_properties(&aligned(&[a, b, c]));
            }
        }
    }
}

#[test]
fn sequential_layout_has_no_gaps() {
    let desc = sequential(&[
        VertexFormat::Float32x3,
        VertexFormat::Uint8x2,
        VertexFormat::Sint32,
        VertexFormat::Unorm8x4,
        VertexFormat::Uint16x2,
    ]);
    assert_sequential_properties(&desc);
    assert_eq!(desc.stride(), 28);
}

#[test]
fn sequential_properties_hold_for_every_triple() {
    for a in VertexFormat::ALL {
        assert_sequential_properties(&sequential(&[a]));
        for b in VertexFormat::ALL {
            assert_sequential_properties(&sequential(&[a, b]));
            for c in VertexFormat::ALL {
                assert_sequential_properties(&sequential(&[a, b, c]));
            }
        }
    }
}

#[test]
fn field_order_changes_the_layout() {
    let (forward, _) = struct_offsets(&[
        ("a", UniformType::F32),
        ("v", UniformType::Vec3f),
        ("b", UniformType::F32),
    ]);
    let (reversed, _) = struct_offsets(&[
        ("v", UniformType::Vec3f),
        ("a", UniformType::F32),
        ("b", UniformType::F32),
    ]);
    assert_eq!(forward, vec![0, 16, 28]);
    assert_eq!(reversed, vec![0, 12, 16]);
}

// ── playground buffers ────────────────────────────────────────────────────

#[test]
fn playground_projection_uniforms() {
    let desc = StructLayoutBuilder::new("uniforms for projection buffer")
        .field("ndc mat", UniformType::Mat4x4f)
        .field("fudge val", UniformType::F32)
        .field("translation mat", UniformType::Mat4x4f)
        .field("rotation mat", UniformType::Mat4x4f)
        .finalize()
        .unwrap();

    let words: Vec<u32> = desc.fields().iter().map(|f| f.word_offset()).collect();
    assert_eq!(words, vec![0, 16, 20, 36]);
    assert_eq!(desc.size(), 208);
    assert_eq!(desc.usage(), BufferUsage::Uniform);
}

#[test]
fn playground_instance_stream() {
    let desc = VertexLayoutBuilder::begin("Instance Buffer", 1, StepMode::Instance)
        .field(1, "color1", VertexFormat::Float32x4)
        .field(2, "color2", VertexFormat::Float32x4)
        .field(3, "scale", VertexFormat::Float32x2)
        .field(4, "offset", VertexFormat::Float32x2)
        .finalize()
        .unwrap();

    let layout = desc.binding_layout();
    let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.byte_offset).collect();
    assert_eq!(offsets, vec![0, 16, 32, 40]);
    assert_eq!(layout.array_stride, 48);
    assert_eq!(desc.stride_words(), 12);

    let mut image = StagingBuffer::for_layout(&desc);
    image.write_vertex(&desc, 0, "scale", &[0.5f32, 0.5]).unwrap();
    image.write_vertex(&desc, 0, 4u32, &[0.1f32, -0.2]).unwrap();
    let scale: f32 = bytemuck::pod_read_unaligned(&image.as_bytes()[32..36]);
    assert_eq!(scale, 0.5);
}

#[test]
fn playground_cube_indices() {
    let desc = IndexLayoutBuilder::new("Index Buffer", 36, IndexFormat::Uint32).finalize().unwrap();
    assert_eq!(desc.total_bytes(), 144);
    assert_eq!(alignment("vec3f"), Ok(16));
}

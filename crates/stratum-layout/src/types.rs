//! Type metadata: byte sizes and alignments for everything a layout can hold.
//!
//! Vertex stream formats and struct member types are two separate closed sets
//! ([`VertexFormat`], [`UniformType`]) so a matrix can never end up in a vertex
//! stream. Both describe themselves through a private [`Shape`] + [`ScalarKind`]
//! pair, which is where the numeric size/alignment rules live.
//!
//! The string oracle ([`byte_size`], [`alignment`]) exists for callers that
//! carry type tags as text (`"float32x3"`, `"vec4f"`, `"uint16"`).

use std::fmt;
use std::str::FromStr;

use crate::align::align_up;
use crate::error::{LayoutError, LayoutResult};

// ── scalars ───────────────────────────────────────────────────────────────

/// Storage type of a single component.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ScalarKind {
    F32,
    I32,
    U32,
    U16,
    U8,
    /// Unsigned 8-bit normalized; read by the shader as `f32` in `[0, 1]`.
    Unorm8,
}

impl ScalarKind {
    #[inline]
    pub const fn byte_width(self) -> u32 {
        match self {
            ScalarKind::F32 | ScalarKind::I32 | ScalarKind::U32 => 4,
            ScalarKind::U16 => 2,
            ScalarKind::U8 | ScalarKind::Unorm8 => 1,
        }
    }
}

// ── shape ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Shape {
    Scalar,
    Vector(u32),
    Matrix { cols: u32, rows: u32 },
}

impl Shape {
    const fn components(self) -> u32 {
        match self {
            Shape::Scalar => 1,
            Shape::Vector(n) => n,
            Shape::Matrix { cols, rows } => cols * rows,
        }
    }

    /// Packed size for vectors and scalars; matrices store each column as an
    /// aligned vector, so `mat3x3` occupies three 16-byte columns.
    const fn byte_size(self, scalar: ScalarKind) -> u32 {
        let w = scalar.byte_width();
        match self {
            Shape::Scalar => w,
            Shape::Vector(n) => n * w,
            Shape::Matrix { cols, rows } => {
                cols * align_up(rows * w, Shape::Vector(rows).alignment(scalar))
            }
        }
    }

    /// Struct-member alignment. Three-component vectors align like four.
    /// Matrices align to a full 16-byte column regardless of row count.
    const fn alignment(self, scalar: ScalarKind) -> u32 {
        let w = scalar.byte_width();
        match self {
            Shape::Scalar => w,
            Shape::Vector(2) => 2 * w,
            Shape::Vector(_) => 4 * w,
            Shape::Matrix { .. } => 16,
        }
    }
}

// ── vertex formats ────────────────────────────────────────────────────────

/// Component format of a vertex attribute.
///
/// Tags follow WebGPU's `GPUVertexFormat` names.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexFormat {
    Uint8x2,
    Uint8x4,
    Unorm8x2,
    Unorm8x4,
    Uint16x2,
    Uint16x4,
    Uint32,
    Uint32x2,
    Uint32x3,
    Uint32x4,
    Sint32,
    Sint32x2,
    Sint32x3,
    Sint32x4,
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
}

impl VertexFormat {
    pub const ALL: [VertexFormat; 18] = [
        VertexFormat::Uint8x2,
        VertexFormat::Uint8x4,
        VertexFormat::Unorm8x2,
        VertexFormat::Unorm8x4,
        VertexFormat::Uint16x2,
        VertexFormat::Uint16x4,
        VertexFormat::Uint32,
        VertexFormat::Uint32x2,
        VertexFormat::Uint32x3,
        VertexFormat::Uint32x4,
        VertexFormat::Sint32,
        VertexFormat::Sint32x2,
        VertexFormat::Sint32x3,
        VertexFormat::Sint32x4,
        VertexFormat::Float32,
        VertexFormat::Float32x2,
        VertexFormat::Float32x3,
        VertexFormat::Float32x4,
    ];

    const fn parts(self) -> (ScalarKind, Shape) {
        use ScalarKind::*;
        use VertexFormat as F;
        match self {
            F::Uint8x2 => (U8, Shape::Vector(2)),
            F::Uint8x4 => (U8, Shape::Vector(4)),
            F::Unorm8x2 => (Unorm8, Shape::Vector(2)),
            F::Unorm8x4 => (Unorm8, Shape::Vector(4)),
            F::Uint16x2 => (U16, Shape::Vector(2)),
            F::Uint16x4 => (U16, Shape::Vector(4)),
            F::Uint32 => (U32, Shape::Scalar),
            F::Uint32x2 => (U32, Shape::Vector(2)),
            F::Uint32x3 => (U32, Shape::Vector(3)),
            F::Uint32x4 => (U32, Shape::Vector(4)),
            F::Sint32 => (I32, Shape::Scalar),
            F::Sint32x2 => (I32, Shape::Vector(2)),
            F::Sint32x3 => (I32, Shape::Vector(3)),
            F::Sint32x4 => (I32, Shape::Vector(4)),
            F::Float32 => (F32, Shape::Scalar),
            F::Float32x2 => (F32, Shape::Vector(2)),
            F::Float32x3 => (F32, Shape::Vector(3)),
            F::Float32x4 => (F32, Shape::Vector(4)),
        }
    }

    /// Bytes occupied inside one vertex stride. No padding is implied.
    #[inline]
    pub const fn byte_size(self) -> u32 {
        let (scalar, shape) = self.parts();
        shape.byte_size(scalar)
    }

    #[inline]
    pub const fn component_count(self) -> u32 {
        self.parts().1.components()
    }

    #[inline]
    pub const fn scalar(self) -> ScalarKind {
        self.parts().0
    }

    pub const fn as_str(self) -> &'static str {
        use VertexFormat as F;
        match self {
            F::Uint8x2 => "uint8x2",
            F::Uint8x4 => "uint8x4",
            F::Unorm8x2 => "unorm8x2",
            F::Unorm8x4 => "unorm8x4",
            F::Uint16x2 => "uint16x2",
            F::Uint16x4 => "uint16x4",
            F::Uint32 => "uint32",
            F::Uint32x2 => "uint32x2",
            F::Uint32x3 => "uint32x3",
            F::Uint32x4 => "uint32x4",
            F::Sint32 => "sint32",
            F::Sint32x2 => "sint32x2",
            F::Sint32x3 => "sint32x3",
            F::Sint32x4 => "sint32x4",
            F::Float32 => "float32",
            F::Float32x2 => "float32x2",
            F::Float32x3 => "float32x3",
            F::Float32x4 => "float32x4",
        }
    }
}

impl FromStr for VertexFormat {
    type Err = LayoutError;

    fn from_str(tag: &str) -> LayoutResult<Self> {
        VertexFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == tag)
            .ok_or_else(|| LayoutError::UnsupportedType { tag: tag.to_owned() })
    }
}

impl fmt::Display for VertexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ── struct member types ───────────────────────────────────────────────────

/// Member type of a uniform or storage struct (WGSL spelling).
///
/// Arrays and nested structs are not representable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformType {
    F32,
    I32,
    U32,
    Vec2f,
    Vec3f,
    Vec4f,
    Vec2i,
    Vec3i,
    Vec4i,
    Vec2u,
    Vec3u,
    Vec4u,
    Mat2x2f,
    Mat3x3f,
    Mat4x4f,
}

impl UniformType {
    pub const ALL: [UniformType; 15] = [
        UniformType::F32,
        UniformType::I32,
        UniformType::U32,
        UniformType::Vec2f,
        UniformType::Vec3f,
        UniformType::Vec4f,
        UniformType::Vec2i,
        UniformType::Vec3i,
        UniformType::Vec4i,
        UniformType::Vec2u,
        UniformType::Vec3u,
        UniformType::Vec4u,
        UniformType::Mat2x2f,
        UniformType::Mat3x3f,
        UniformType::Mat4x4f,
    ];

    const fn parts(self) -> (ScalarKind, Shape) {
        use ScalarKind::{F32, I32, U32};
        use UniformType as T;
        match self {
            T::F32 => (F32, Shape::Scalar),
            T::I32 => (I32, Shape::Scalar),
            T::U32 => (U32, Shape::Scalar),
            T::Vec2f => (F32, Shape::Vector(2)),
            T::Vec3f => (F32, Shape::Vector(3)),
            T::Vec4f => (F32, Shape::Vector(4)),
            T::Vec2i => (I32, Shape::Vector(2)),
            T::Vec3i => (I32, Shape::Vector(3)),
            T::Vec4i => (I32, Shape::Vector(4)),
            T::Vec2u => (U32, Shape::Vector(2)),
            T::Vec3u => (U32, Shape::Vector(3)),
            T::Vec4u => (U32, Shape::Vector(4)),
            T::Mat2x2f => (F32, Shape::Matrix { cols: 2, rows: 2 }),
            T::Mat3x3f => (F32, Shape::Matrix { cols: 3, rows: 3 }),
            T::Mat4x4f => (F32, Shape::Matrix { cols: 4, rows: 4 }),
        }
    }

    /// Storage extent. The next member is placed after this many bytes
    /// (then aligned), never after the padded alignment.
    #[inline]
    pub const fn byte_size(self) -> u32 {
        let (scalar, shape) = self.parts();
        shape.byte_size(scalar)
    }

    #[inline]
    pub const fn alignment(self) -> u32 {
        let (scalar, shape) = self.parts();
        shape.alignment(scalar)
    }

    /// Number of scalars the host writes for this member.
    ///
    /// Matrices count their logical elements; the packer inserts column padding.
    #[inline]
    pub const fn component_count(self) -> u32 {
        self.parts().1.components()
    }

    #[inline]
    pub const fn scalar(self) -> ScalarKind {
        self.parts().0
    }

    /// `(columns, rows)` for matrix types.
    pub const fn matrix_dims(self) -> Option<(u32, u32)> {
        match self.parts().1 {
            Shape::Matrix { cols, rows } => Some((cols, rows)),
            _ => None,
        }
    }

    /// Byte distance between matrix columns; `None` for non-matrix types.
    pub const fn column_stride(self) -> Option<u32> {
        match self.matrix_dims() {
            Some((cols, _)) => Some(self.byte_size() / cols),
            None => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        use UniformType as T;
        match self {
            T::F32 => "f32",
            T::I32 => "i32",
            T::U32 => "u32",
            T::Vec2f => "vec2f",
            T::Vec3f => "vec3f",
            T::Vec4f => "vec4f",
            T::Vec2i => "vec2i",
            T::Vec3i => "vec3i",
            T::Vec4i => "vec4i",
            T::Vec2u => "vec2u",
            T::Vec3u => "vec3u",
            T::Vec4u => "vec4u",
            T::Mat2x2f => "mat2x2f",
            T::Mat3x3f => "mat3x3f",
            T::Mat4x4f => "mat4x4f",
        }
    }
}

impl FromStr for UniformType {
    type Err = LayoutError;

    fn from_str(tag: &str) -> LayoutResult<Self> {
        UniformType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| LayoutError::UnsupportedType { tag: tag.to_owned() })
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ── index formats ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexFormat {
    Uint16,
    Uint32,
}

impl IndexFormat {
    #[inline]
    pub const fn byte_size(self) -> u32 {
        match self {
            IndexFormat::Uint16 => 2,
            IndexFormat::Uint32 => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            IndexFormat::Uint16 => "uint16",
            IndexFormat::Uint32 => "uint32",
        }
    }
}

impl FromStr for IndexFormat {
    type Err = LayoutError;

    fn from_str(tag: &str) -> LayoutResult<Self> {
        match tag {
            "uint16" => Ok(IndexFormat::Uint16),
            "uint32" => Ok(IndexFormat::Uint32),
            _ => Err(LayoutError::UnsupportedType { tag: tag.to_owned() }),
        }
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ── string oracle ─────────────────────────────────────────────────────────

/// Byte size of any known type tag: vertex format, struct member type, or
/// index format.
pub fn byte_size(tag: &str) -> LayoutResult<u32> {
    if let Ok(f) = tag.parse::<VertexFormat>() {
        return Ok(f.byte_size());
    }
    if let Ok(t) = tag.parse::<UniformType>() {
        return Ok(t.byte_size());
    }
    tag.parse::<IndexFormat>().map(IndexFormat::byte_size)
}

/// Struct-member alignment of a type tag. Only struct member types have one.
pub fn alignment(tag: &str) -> LayoutResult<u32> {
    tag.parse::<UniformType>().map(UniformType::alignment)
}

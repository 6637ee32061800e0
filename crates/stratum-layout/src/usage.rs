use std::fmt;

/// What a buffer is bound as. Drives the usage flags the allocator requests.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    Vertex,
    Index,
    Uniform,
    Storage,
    ReadOnlyStorage,
}

impl fmt::Display for BufferUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BufferUsage::Vertex => "vertex",
            BufferUsage::Index => "index",
            BufferUsage::Uniform => "uniform",
            BufferUsage::Storage => "storage",
            BufferUsage::ReadOnlyStorage => "read-only-storage",
        })
    }
}

/// Binding category of a struct-mode buffer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum StructUsage {
    #[default]
    Uniform,
    Storage,
    ReadOnlyStorage,
}

impl From<StructUsage> for BufferUsage {
    fn from(usage: StructUsage) -> Self {
        match usage {
            StructUsage::Uniform => BufferUsage::Uniform,
            StructUsage::Storage => BufferUsage::Storage,
            StructUsage::ReadOnlyStorage => BufferUsage::ReadOnlyStorage,
        }
    }
}

/// Rate at which a vertex stream advances.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum StepMode {
    #[default]
    Vertex,
    Instance,
}

use thiserror::Error;

/// Construction-time failures for meshes and packets.
///
/// Query-time conditions (misses, negative discriminants, zero velocity) are
/// ordinary outcomes and never surface as errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    #[error("vertex positions must have 3 components, got {0}")]
    PositionComponents(usize),

    #[error("vertex stride {stride} cannot hold a position at offset {offset} (buffer length {len})")]
    VertexStride {
        stride: usize,
        offset: usize,
        len: usize,
    },

    #[error("triangle topology requires a multiple of 3 {what}, got {count}")]
    TriangleTopology { what: &'static str, count: usize },

    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("triangle {0} has zero area")]
    DegenerateTriangle(usize),

    #[error("ellipsoid radii must be finite and positive, got {0:?}")]
    InvalidRadius([f32; 3]),
}

pub type Result<T, E = CollisionError> = std::result::Result<T, E>;

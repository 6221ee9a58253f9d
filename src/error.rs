use thiserror::Error;

/// Top-level error type for the B-rep kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("direction is parallel to the target plane")]
    ParallelProjection,
}

/// Errors reported when a solid's topology is inconsistent.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("loop is not closed: {0}")]
    LoopNotClosed(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("face {face} is not planar (deviation {deviation})")]
    NonPlanarFace { face: String, deviation: f64 },
}

/// Errors related to solid construction.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("triangulation failed: {0}")]
    Failed(String),

    #[error("index {index} does not fit in a 16-bit index buffer")]
    IndexOverflow { index: usize },
}

/// Convenience type alias for results using [`KernelError`].
pub type Result<T> = std::result::Result<T, KernelError>;

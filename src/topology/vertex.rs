use crate::math::Point3;

use super::VertexId;

/// A point of the solid's boundary.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Identifier within the owning solid.
    pub id: VertexId,
    /// The 3D position of the vertex.
    pub point: Point3,
}

impl Vertex {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(id: VertexId, point: Point3) -> Self {
        Self { id, point }
    }
}

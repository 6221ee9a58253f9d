use super::{FaceId, LoopId};

/// A planar face bounded by an outer loop and optional hole loops.
///
/// The outer loop winds counter-clockwise seen from outside the solid;
/// inner loops wind the other way.
#[derive(Debug, Clone)]
pub struct Face {
    /// Identifier within the owning solid.
    pub id: FaceId,
    /// The outer boundary.
    pub outer: LoopId,
    /// Hole boundaries.
    pub inner: Vec<LoopId>,
}

impl Face {
    /// All loops of the face, outer first.
    pub fn loops(&self) -> impl Iterator<Item = LoopId> + '_ {
        std::iter::once(self.outer).chain(self.inner.iter().copied())
    }
}

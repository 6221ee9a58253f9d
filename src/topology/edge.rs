use super::{EdgeId, LoopId, VertexId};

/// Which of an edge's two directed halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Traverses the edge from start to end.
    Left,
    /// Traverses the edge from end to start.
    Right,
}

impl Side {
    /// The other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Reference to one directed half of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfEdgeId {
    /// The edge this half belongs to.
    pub edge: EdgeId,
    /// Which half.
    pub side: Side,
}

impl HalfEdgeId {
    /// Creates a half-edge reference.
    #[must_use]
    pub fn new(edge: EdgeId, side: Side) -> Self {
        Self { edge, side }
    }

    /// The left (start to end) half of `edge`.
    #[must_use]
    pub fn left(edge: EdgeId) -> Self {
        Self::new(edge, Side::Left)
    }

    /// The right (end to start) half of `edge`.
    #[must_use]
    pub fn right(edge: EdgeId) -> Self {
        Self::new(edge, Side::Right)
    }

    /// The other half of the same edge.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::new(self.edge, self.side.opposite())
    }
}

/// One directed traversal of an edge.
#[derive(Debug, Clone)]
pub struct HalfEdge {
    /// The vertex this half starts from.
    pub vertex: VertexId,
    /// The loop currently using this half, if any.
    pub loop_id: Option<LoopId>,
}

/// An undirected edge holding its two directed halves.
///
/// The left half starts at the edge's start vertex, the right half at its
/// end vertex. At most one loop may use each half.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Identifier within the owning solid.
    pub id: EdgeId,
    /// Start-to-end half.
    pub left: HalfEdge,
    /// End-to-start half.
    pub right: HalfEdge,
}

impl Edge {
    /// Creates an edge from `start` to `end` with both halves unlinked.
    #[must_use]
    pub fn new(id: EdgeId, start: VertexId, end: VertexId) -> Self {
        Self {
            id,
            left: HalfEdge {
                vertex: start,
                loop_id: None,
            },
            right: HalfEdge {
                vertex: end,
                loop_id: None,
            },
        }
    }

    /// Start vertex.
    #[must_use]
    pub fn start(&self) -> VertexId {
        self.left.vertex
    }

    /// End vertex.
    #[must_use]
    pub fn end(&self) -> VertexId {
        self.right.vertex
    }

    /// Returns the requested half.
    #[must_use]
    pub fn half(&self, side: Side) -> &HalfEdge {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Returns the requested half mutably.
    pub fn half_mut(&mut self, side: Side) -> &mut HalfEdge {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// The side that runs `from` to `to`, if this edge connects them.
    #[must_use]
    pub fn side_between(&self, from: VertexId, to: VertexId) -> Option<Side> {
        if self.start() == from && self.end() == to {
            Some(Side::Left)
        } else if self.start() == to && self.end() == from {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_run_in_opposite_directions() {
        let edge = Edge::new(EdgeId(10_000), VertexId(1), VertexId(2));
        assert_eq!(edge.half(Side::Left).vertex, VertexId(1));
        assert_eq!(edge.half(Side::Right).vertex, VertexId(2));
        assert_eq!(edge.side_between(VertexId(2), VertexId(1)), Some(Side::Right));
        assert_eq!(edge.side_between(VertexId(1), VertexId(3)), None);
    }

    #[test]
    fn opposite_half_flips_side() {
        let h = HalfEdgeId::left(EdgeId(10_000));
        assert_eq!(h.opposite(), HalfEdgeId::right(EdgeId(10_000)));
        assert_eq!(h.opposite().opposite(), h);
    }
}

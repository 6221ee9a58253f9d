use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Identifier of a vertex, unique within its solid.
    VertexId
}

entity_id! {
    /// Identifier of an edge, unique within its solid.
    EdgeId
}

entity_id! {
    /// Identifier of a face, unique within its solid.
    FaceId
}

const FIRST_FACE_ID: u32 = 0;
const FIRST_EDGE_ID: u32 = 10_000;
const FIRST_VERTEX_ID: u32 = 100_000;

/// Per-solid counters handing out vertex, edge, and face identifiers.
///
/// Each kind starts at its own offset so identifiers of different kinds
/// never collide when written side by side.
#[derive(Debug, Clone)]
pub(crate) struct IdAllocator {
    next_vertex: u32,
    next_edge: u32,
    next_face: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_vertex: FIRST_VERTEX_ID,
            next_edge: FIRST_EDGE_ID,
            next_face: FIRST_FACE_ID,
        }
    }
}

impl IdAllocator {
    pub(crate) fn vertex(&mut self) -> VertexId {
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;
        id
    }

    pub(crate) fn edge(&mut self) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        id
    }

    pub(crate) fn face(&mut self) -> FaceId {
        let id = FaceId(self.next_face);
        self.next_face += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_start_at_distinct_offsets() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.face(), FaceId(0));
        assert_eq!(ids.edge(), EdgeId(10_000));
        assert_eq!(ids.vertex(), VertexId(100_000));
    }

    #[test]
    fn counters_increase_monotonically() {
        let mut ids = IdAllocator::default();
        let a = ids.vertex();
        let b = ids.vertex();
        assert!(b > a);
        assert_eq!(b.0 - a.0, 1);
    }
}

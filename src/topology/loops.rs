use std::collections::VecDeque;

use super::HalfEdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a loop within a solid.
    pub struct LoopId;
}

/// A closed, ordered cycle of half-edges.
///
/// The half after the last one is the first one. Membership is edited
/// through [`Solid`](super::Solid) so each half's loop back-reference
/// stays in sync.
#[derive(Debug, Clone, Default)]
pub struct Loop {
    pub(crate) halves: VecDeque<HalfEdgeId>,
}

impl Loop {
    /// The half-edges in traversal order.
    pub fn halves(&self) -> impl ExactSizeIterator<Item = HalfEdgeId> + '_ {
        self.halves.iter().copied()
    }

    /// Number of half-edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.halves.len()
    }

    /// Whether the loop has no half-edges yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.halves.is_empty()
    }

    /// Position of `half` in the loop.
    #[must_use]
    pub fn position(&self, half: HalfEdgeId) -> Option<usize> {
        self.halves.iter().position(|&h| h == half)
    }
}

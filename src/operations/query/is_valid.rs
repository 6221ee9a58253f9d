use std::collections::HashSet;

use crate::error::{Result, TopologyError};
use crate::math::EPSILON;
use crate::topology::{Face, LoopId, Solid};

/// Validates the topological and geometric consistency of a solid.
///
/// Every face loop must be closed and traversal-consistent, every half it
/// lists must point back at it, no loop may use both halves of one edge,
/// and every face must be planar within [`EPSILON`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IsValid;

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the validation.
    ///
    /// # Errors
    ///
    /// Returns the first [`TopologyError`] found.
    pub fn execute(&self, solid: &Solid) -> Result<()> {
        for face in solid.faces() {
            for lp in face.loops() {
                check_loop(solid, face, lp)?;
            }
            check_planar(solid, face)?;
        }
        Ok(())
    }
}

fn check_loop(solid: &Solid, face: &Face, lp: LoopId) -> Result<()> {
    let halves: Vec<_> = solid.loop_data(lp).halves().collect();
    if halves.len() < 3 {
        return Err(TopologyError::LoopNotClosed(format!("face {} has a loop of {} edges", face.id, halves.len())).into());
    }

    let mut edges = HashSet::with_capacity(halves.len());
    for (i, &h) in halves.iter().enumerate() {
        let next = halves[(i + 1) % halves.len()];
        if solid.half_end(h) != solid.half_start(next) {
            return Err(TopologyError::LoopNotClosed(format!(
                "face {}: edge {} does not lead into edge {}",
                face.id, h.edge, next.edge
            ))
            .into());
        }
        if solid.half(h).loop_id != Some(lp) {
            return Err(TopologyError::InvalidTopology(format!(
                "face {}: edge {} does not point back at its loop",
                face.id, h.edge
            ))
            .into());
        }
        if !edges.insert(h.edge) {
            return Err(TopologyError::InvalidTopology(format!(
                "face {}: loop uses edge {} twice",
                face.id, h.edge
            ))
            .into());
        }
    }
    Ok(())
}

fn check_planar(solid: &Solid, face: &Face) -> Result<()> {
    let plane = solid.face_plane(face.id)?;
    let deviation = face
        .loops()
        .flat_map(|lp| solid.loop_points(lp))
        .map(|p| plane.signed_distance(&p).abs())
        .fold(0.0, f64::max);
    if deviation > EPSILON {
        return Err(TopologyError::NonPlanarFace {
            face: face.id.to_string(),
            deviation,
        }
        .into());
    }
    Ok(())
}

impl Solid {
    /// Checks the solid's invariants. See [`IsValid`].
    ///
    /// # Errors
    ///
    /// Returns the first [`TopologyError`] found.
    pub fn validate(&self) -> Result<()> {
        IsValid::new().execute(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use crate::geometry::Polygon;
    use crate::math::Point3;
    use crate::topology::HalfEdgeId;

    #[test]
    fn polygon_face_is_valid() {
        let mut solid = Solid::new();
        solid.add_polygon_face(&Polygon::rectangle(1.0, 1.0).unwrap(), &[], false);
        assert!(solid.validate().is_ok());
    }

    #[test]
    fn broken_chain_is_reported() {
        let mut solid = Solid::new();
        let a = solid.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = solid.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = solid.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let lp = solid.add_loop();
        for (from, to) in [(a, b), (c, b), (c, a)] {
            let e = solid.add_edge(from, to);
            solid.loop_push_back(lp, HalfEdgeId::left(e));
        }
        solid.add_face(lp, Vec::new());
        assert!(matches!(
            solid.validate(),
            Err(KernelError::Topology(TopologyError::LoopNotClosed(_)))
        ));
    }

    #[test]
    fn non_planar_face_is_reported() {
        let skew = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.5),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        let mut solid = Solid::new();
        solid.add_polygon_face(&skew, &[], false);
        assert!(matches!(
            solid.validate(),
            Err(KernelError::Topology(TopologyError::NonPlanarFace { .. }))
        ));
    }

    #[test]
    fn loop_using_both_halves_is_reported() {
        let mut solid = Solid::new();
        let a = solid.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = solid.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = solid.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let ab = solid.add_edge(a, b);
        let bc = solid.add_edge(b, c);
        let lp = solid.add_loop();
        // a -> b -> a -> b ... reuses edge ab in both directions
        solid.loop_push_back(lp, HalfEdgeId::left(ab));
        solid.loop_push_back(lp, HalfEdgeId::right(ab));
        solid.loop_push_back(lp, HalfEdgeId::left(bc));
        solid.add_face(lp, Vec::new());
        assert!(solid.validate().is_err());
    }
}

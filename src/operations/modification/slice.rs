use tracing::debug;

use crate::geometry::Plane;
use crate::math::intersect_3d::segment_plane_crossing;
use crate::topology::{HalfEdgeId, Solid};

/// Splits every edge of a solid that crosses a plane.
///
/// Each crossing edge is cut in two at the crossing point and the new
/// half-edges are spliced into the loops that used the original. The
/// resulting open section is not capped.
#[derive(Debug, Clone)]
pub struct Slice {
    plane: Plane,
}

impl Slice {
    /// Creates a new `Slice` operation.
    #[must_use]
    pub fn new(plane: Plane) -> Self {
        Self { plane }
    }

    /// Executes the slice in place, returning the number of edges split.
    ///
    /// Only edges present before the call are tested. Crossings within
    /// [`EPSILON`](crate::math::EPSILON) of an endpoint are ignored, so
    /// slicing twice with the same plane splits nothing the second time.
    pub fn execute(&self, solid: &mut Solid) -> usize {
        let mut split = 0;
        for id in solid.edge_ids() {
            let edge = solid.edge(id);
            let (start, end) = (edge.start(), edge.end());
            let (left_loop, right_loop) = (edge.left.loop_id, edge.right.loop_id);
            let Some(point) =
                segment_plane_crossing(&solid.vertex(start).point, &solid.vertex(end).point, &self.plane)
            else {
                continue;
            };

            let mid = solid.add_vertex(point);
            let tail = solid.add_edge(mid, end);
            solid.set_edge_end(id, mid);
            if let Some(lp) = left_loop {
                solid.loop_insert_after(lp, HalfEdgeId::left(id), HalfEdgeId::left(tail));
            }
            if let Some(lp) = right_loop {
                solid.loop_insert_before(lp, HalfEdgeId::right(id), HalfEdgeId::right(tail));
            }
            split += 1;
        }

        debug!(split, edges = solid.edge_count(), "sliced solid");
        split
    }
}

impl Solid {
    /// Splits every edge crossing `plane`. See [`Slice`].
    pub fn slice(&mut self, plane: &Plane) -> usize {
        Slice::new(plane.clone()).execute(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::math::{Point3, Vector3};
    use crate::operations::Extrude;

    fn cube() -> Solid {
        let square = Polygon::rectangle_from_corners(Point3::origin(), Point3::new(1.0, 1.0, 0.0)).unwrap();
        Extrude::new(square, Vector3::z(), 1.0).execute().unwrap()
    }

    fn mid_height() -> Plane {
        Plane::from_normal(Point3::new(0.0, 0.0, 0.5), Vector3::z()).unwrap()
    }

    #[test]
    fn splits_vertical_edges() {
        let mut solid = cube();
        assert_eq!(solid.slice(&mid_height()), 4);
        assert_eq!(solid.vertex_count(), 12);
        assert_eq!(solid.edge_count(), 16);
        assert_eq!(solid.face_count(), 6);
        solid.validate().unwrap();

        // Side faces gained two vertices each.
        let sizes: Vec<usize> = solid.faces().map(|f| solid.loop_data(f.outer).len()).collect();
        assert_eq!(sizes.iter().filter(|&&n| n == 6).count(), 4);
    }

    #[test]
    fn reslicing_is_idempotent() {
        let mut solid = cube();
        solid.slice(&mid_height());
        assert_eq!(solid.slice(&mid_height()), 0);
        assert_eq!(solid.vertex_count(), 12);
    }

    #[test]
    fn plane_through_vertices_splits_nothing() {
        let mut solid = cube();
        let top = Plane::from_normal(Point3::new(0.0, 0.0, 1.0), Vector3::z()).unwrap();
        assert_eq!(solid.slice(&top), 0);
    }

    #[test]
    fn missing_plane_leaves_solid_untouched() {
        let mut solid = cube();
        let far = Plane::from_normal(Point3::new(0.0, 0.0, 5.0), Vector3::z()).unwrap();
        assert_eq!(solid.slice(&far), 0);
        assert_eq!(solid.edge_count(), 12);
    }
}

//! Building blocks shared by the extrusion and sweep operations.
//!
//! A *boundary* is a closed chain of half-edges already used by a face
//! (typically a cap). Sweeping a boundary builds one side face per half
//! out of the opposite, still unused halves, and returns the new boundary
//! at the far end so sweeps can be chained.

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{Plane, Polygon};
use crate::math::intersect_3d::project_along;
use crate::math::{Vector3, TOLERANCE};
use crate::topology::{EdgeId, FaceId, HalfEdgeId, LoopId, Solid, VertexId};

impl Solid {
    /// Sweeps every vertex of a loop by `direction * distance`.
    ///
    /// Builds one quad side face per half-edge of the loop from the
    /// half's unused opposite, two rails, and the translated edge. Returns
    /// a new loop, not yet attached to a face, running opposite to the
    /// input so it can close the far end.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is empty or the offset is zero.
    pub fn sweep_loop(&mut self, loop_id: LoopId, direction: &Vector3, distance: f64) -> Result<LoopId> {
        let offset = direction * distance;
        if offset.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let boundary: Vec<HalfEdgeId> = self.loop_data(loop_id).halves().collect();
        if boundary.is_empty() {
            return Err(OperationError::InvalidInput("cannot sweep an empty loop".into()).into());
        }

        let swept: Vec<VertexId> = boundary
            .iter()
            .map(|&h| {
                let point = self.vertex(self.half_start(h)).point + offset;
                self.add_vertex(point)
            })
            .collect();
        let rings = self.build_side_faces(&boundary, &swept);

        let end = self.add_loop();
        for ring in rings {
            self.loop_push_front(end, HalfEdgeId::right(ring));
        }
        Ok(end)
    }

    /// Projects a boundary along `direction` onto `plane` and builds the
    /// side faces between the two.
    ///
    /// Each boundary vertex is projected once and shared by both of its
    /// edges. Returns the new boundary on `plane`, wound like the input.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParallelProjection`] if `direction` is
    /// parallel to `plane`.
    pub fn sweep_edges_between_planes(
        &mut self,
        boundary: &[HalfEdgeId],
        direction: &Vector3,
        plane: &Plane,
    ) -> Result<Vec<HalfEdgeId>> {
        let mut projected = Vec::with_capacity(boundary.len());
        for &h in boundary {
            projected.push(self.project_vertex_along(self.half_start(h), direction, plane)?);
        }
        let rings = self.build_side_faces(boundary, &projected);
        Ok(rings.into_iter().map(HalfEdgeId::left).collect())
    }

    /// Adds a vertex where `vertex` lands when moved along `direction`
    /// onto `plane`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParallelProjection`] if `direction` is
    /// parallel to `plane`.
    pub fn project_vertex_along(&mut self, vertex: VertexId, direction: &Vector3, plane: &Plane) -> Result<VertexId> {
        let point = project_along(&self.vertex(vertex).point, direction, plane)
            .ok_or(GeometryError::ParallelProjection)?;
        Ok(self.add_vertex(point))
    }

    /// Sweeps a boundary through a sequence of planes, travelling from
    /// one plane origin to the next.
    ///
    /// Returns the boundary on the last plane.
    ///
    /// # Errors
    ///
    /// Returns an error if a step is parallel to its target plane.
    pub fn sweep_edges(&mut self, boundary: Vec<HalfEdgeId>, planes: &[Plane]) -> Result<Vec<HalfEdgeId>> {
        let mut boundary = boundary;
        for pair in planes.windows(2) {
            let travel = pair[1].origin() - pair[0].origin();
            boundary = self.sweep_edges_between_planes(&boundary, &travel, &pair[1])?;
        }
        Ok(boundary)
    }

    /// Adds a polygon's edges on `start`, then sweeps them along
    /// `direction` onto `end`.
    ///
    /// The polygon is first projected onto `start` along `direction`.
    /// Returns the boundary on `end`; neither end is capped.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParallelProjection`] if `direction` is
    /// parallel to either plane.
    pub fn sweep_polygon_between_planes(
        &mut self,
        polygon: &Polygon,
        direction: &Vector3,
        start: &Plane,
        end: &Plane,
    ) -> Result<Vec<HalfEdgeId>> {
        let on_start = polygon.project_along(direction, start)?;
        let boundary: Vec<HalfEdgeId> = self
            .add_polygon_edges(&on_start)
            .into_iter()
            .map(HalfEdgeId::left)
            .collect();
        self.sweep_edges_between_planes(&boundary, direction, end)
    }

    /// Closes open boundaries with a new face.
    ///
    /// The first edge list becomes the outer loop, the rest become holes.
    /// With `reverse`, each edge's right half is used and the order is
    /// reversed, which closes the far end of a sweep whose boundary
    /// halves run the other way.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if no boundary is given.
    pub fn cap(&mut self, boundaries: &[Vec<EdgeId>], reverse: bool) -> Result<FaceId> {
        let Some((outer, inner)) = boundaries.split_first() else {
            return Err(OperationError::InvalidInput("cap needs an outer boundary".into()).into());
        };
        let outer = self.cap_loop(outer, reverse);
        let inner = inner.iter().map(|edges| self.cap_loop(edges, reverse)).collect();
        Ok(self.add_face(outer, inner))
    }

    fn cap_loop(&mut self, edges: &[EdgeId], reverse: bool) -> LoopId {
        let lp = self.add_loop();
        for &edge in edges {
            if reverse {
                self.loop_push_front(lp, HalfEdgeId::right(edge));
            } else {
                self.loop_push_back(lp, HalfEdgeId::left(edge));
            }
        }
        lp
    }

    /// Builds the quad between each boundary half and its image.
    ///
    /// `image[i]` is where the start vertex of `boundary[i]` went. Returns
    /// the ring edges joining consecutive images, whose left halves are
    /// used by the new faces.
    fn build_side_faces(&mut self, boundary: &[HalfEdgeId], image: &[VertexId]) -> Vec<EdgeId> {
        let n = boundary.len();
        let rails: Vec<EdgeId> = boundary
            .iter()
            .zip(image)
            .map(|(&h, &to)| {
                let from = self.half_start(h);
                self.add_edge(from, to)
            })
            .collect();

        let mut rings = Vec::with_capacity(n);
        for j in 0..n {
            let k = (j + 1) % n;
            let ring = self.add_edge(image[j], image[k]);
            let lp = self.add_loop();
            self.loop_push_back(lp, boundary[j].opposite());
            self.loop_push_back(lp, HalfEdgeId::left(rails[j]));
            self.loop_push_back(lp, HalfEdgeId::left(ring));
            self.loop_push_back(lp, HalfEdgeId::right(rails[k]));
            self.add_face(lp, Vec::new());
            rings.push(ring);
        }
        rings
    }
}

use std::collections::BTreeMap;
use std::fmt;

use slotmap::SlotMap;

use crate::error::Result;
use crate::geometry::{Plane, Polygon};
use crate::math::{points_almost_equal, Point3};

use super::ids::IdAllocator;
use super::{Edge, EdgeId, Face, FaceId, HalfEdge, HalfEdgeId, Loop, LoopId, Side, Vertex, VertexId};

/// Boundary representation of one solid.
///
/// Owns every vertex, edge, loop, and face it is built from. Entities
/// reference each other by identifier only and are resolved through this
/// store. Looking up an identifier that is not in the store is an
/// invariant violation and panics.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    ids: IdAllocator,
    vertices: BTreeMap<VertexId, Vertex>,
    edges: BTreeMap<EdgeId, Edge>,
    loops: SlotMap<LoopId, Loop>,
    faces: BTreeMap<FaceId, Face>,
}

impl Solid {
    /// Creates an empty solid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        let id = self.ids.vertex();
        self.vertices.insert(id, Vertex::new(id, point));
        id
    }

    /// Returns the vertex.
    ///
    /// # Panics
    ///
    /// Panics if the vertex is not in this solid.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[&id]
    }

    /// Finds a vertex within [`EPSILON`](crate::math::EPSILON) of `point`.
    #[must_use]
    pub fn find_vertex(&self, point: &Point3) -> Option<VertexId> {
        self.vertices
            .values()
            .find(|v| points_almost_equal(&v.point, point))
            .map(|v| v.id)
    }

    /// Iterates vertices in identifier order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Edge operations ---

    /// Inserts an edge from `from` to `to` with both halves unlinked.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> EdgeId {
        let id = self.ids.edge();
        self.edges.insert(id, Edge::new(id, from, to));
        id
    }

    /// Returns a half-edge running `from` to `to`.
    ///
    /// With `allow_reuse`, an existing edge between the two vertices whose
    /// matching half is not yet in a loop is returned instead of
    /// allocating a new edge. This lets adjacent faces share edges.
    pub fn add_edge_reusing(&mut self, from: VertexId, to: VertexId, allow_reuse: bool) -> HalfEdgeId {
        if allow_reuse {
            let existing = self.edges.values().find_map(|e| {
                e.side_between(from, to)
                    .filter(|&side| e.half(side).loop_id.is_none())
                    .map(|side| HalfEdgeId::new(e.id, side))
            });
            if let Some(half) = existing {
                return half;
            }
        }
        HalfEdgeId::left(self.add_edge(from, to))
    }

    /// Returns the edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge is not in this solid.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[&id]
    }

    /// Iterates edges in identifier order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Identifiers of all edges, in order.
    #[must_use]
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().copied().collect()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Moves the end of an edge to another vertex.
    ///
    /// # Panics
    ///
    /// Panics if the edge is not in this solid.
    pub(crate) fn set_edge_end(&mut self, id: EdgeId, end: VertexId) {
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.right.vertex = end;
        } else {
            panic!("edge {id} is not in this solid");
        }
    }

    /// Returns a half-edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge is not in this solid.
    #[must_use]
    pub fn half(&self, half: HalfEdgeId) -> &HalfEdge {
        self.edge(half.edge).half(half.side)
    }

    /// Vertex a half-edge starts from.
    #[must_use]
    pub fn half_start(&self, half: HalfEdgeId) -> VertexId {
        self.half(half).vertex
    }

    /// Vertex a half-edge ends at.
    #[must_use]
    pub fn half_end(&self, half: HalfEdgeId) -> VertexId {
        self.half(half.opposite()).vertex
    }

    fn link(&mut self, half: HalfEdgeId, loop_id: Option<LoopId>) {
        if let Some(edge) = self.edges.get_mut(&half.edge) {
            edge.half_mut(half.side).loop_id = loop_id;
        } else {
            panic!("edge {} is not in this solid", half.edge);
        }
    }

    // --- Loop operations ---

    /// Inserts an empty loop.
    pub fn add_loop(&mut self) -> LoopId {
        self.loops.insert(Loop::default())
    }

    /// Returns the loop.
    ///
    /// # Panics
    ///
    /// Panics if the loop is not in this solid.
    #[must_use]
    pub fn loop_data(&self, id: LoopId) -> &Loop {
        &self.loops[id]
    }

    fn loop_mut(&mut self, id: LoopId) -> &mut Loop {
        &mut self.loops[id]
    }

    /// Appends a half-edge to the end of a loop.
    pub fn loop_push_back(&mut self, id: LoopId, half: HalfEdgeId) {
        self.loop_mut(id).halves.push_back(half);
        self.link(half, Some(id));
    }

    /// Prepends a half-edge to the start of a loop.
    pub fn loop_push_front(&mut self, id: LoopId, half: HalfEdgeId) {
        self.loop_mut(id).halves.push_front(half);
        self.link(half, Some(id));
    }

    /// Inserts `half` right after `anchor`.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is not in the loop.
    pub fn loop_insert_after(&mut self, id: LoopId, anchor: HalfEdgeId, half: HalfEdgeId) {
        let lp = self.loop_mut(id);
        let Some(at) = lp.position(anchor) else {
            panic!("half-edge of edge {} is not in the loop", anchor.edge);
        };
        lp.halves.insert(at + 1, half);
        self.link(half, Some(id));
    }

    /// Inserts `half` right before `anchor`.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is not in the loop.
    pub fn loop_insert_before(&mut self, id: LoopId, anchor: HalfEdgeId, half: HalfEdgeId) {
        let lp = self.loop_mut(id);
        let Some(at) = lp.position(anchor) else {
            panic!("half-edge of edge {} is not in the loop", anchor.edge);
        };
        lp.halves.insert(at, half);
        self.link(half, Some(id));
    }

    /// Removes `half` from a loop, returning whether it was present.
    pub fn loop_remove(&mut self, id: LoopId, half: HalfEdgeId) -> bool {
        let lp = self.loop_mut(id);
        let Some(at) = lp.position(half) else {
            return false;
        };
        lp.halves.remove(at);
        self.link(half, None);
        true
    }

    /// The edges of a loop in traversal order.
    #[must_use]
    pub fn loop_edges(&self, id: LoopId) -> Vec<EdgeId> {
        self.loop_data(id).halves().map(|h| h.edge).collect()
    }

    /// The vertices a loop passes through, in traversal order.
    #[must_use]
    pub fn loop_vertices(&self, id: LoopId) -> Vec<VertexId> {
        self.loop_data(id).halves().map(|h| self.half_start(h)).collect()
    }

    /// Positions of the loop's vertices, in traversal order.
    #[must_use]
    pub fn loop_points(&self, id: LoopId) -> Vec<Point3> {
        self.loop_data(id)
            .halves()
            .map(|h| self.vertex(self.half_start(h)).point)
            .collect()
    }

    /// Builds a closed loop through `points`.
    ///
    /// With `merge`, points within tolerance of an existing vertex reuse
    /// it, and edges already joining two consecutive vertices are reused
    /// when their matching half is free.
    pub fn build_loop_from_polygon(&mut self, points: &[Point3], merge: bool) -> LoopId {
        let mut verts = Vec::with_capacity(points.len());
        for p in points {
            let existing = if merge { self.find_vertex(p) } else { None };
            verts.push(existing.unwrap_or_else(|| self.add_vertex(*p)));
        }

        let lp = self.add_loop();
        let n = verts.len();
        for i in 0..n {
            let half = self.add_edge_reusing(verts[i], verts[(i + 1) % n], merge);
            self.loop_push_back(lp, half);
        }
        lp
    }

    /// Adds fresh vertices and a closed chain of edges for `polygon`.
    ///
    /// No half-edge is put into a loop.
    pub fn add_polygon_edges(&mut self, polygon: &Polygon) -> Vec<EdgeId> {
        let verts: Vec<VertexId> = polygon.vertices().iter().map(|p| self.add_vertex(*p)).collect();
        let n = verts.len();
        (0..n).map(|i| self.add_edge(verts[i], verts[(i + 1) % n])).collect()
    }

    // --- Face operations ---

    /// Inserts a face bounded by existing loops. Winding is not checked.
    pub fn add_face(&mut self, outer: LoopId, inner: Vec<LoopId>) -> FaceId {
        let id = self.ids.face();
        self.faces.insert(id, Face { id, outer, inner });
        id
    }

    /// Builds loops for an outer polygon and its holes and adds a face.
    pub fn add_polygon_face(&mut self, outer: &Polygon, inner: &[Polygon], merge: bool) -> FaceId {
        let outer_loop = self.build_loop_from_polygon(outer.vertices(), merge);
        let inner_loops = inner
            .iter()
            .map(|hole| self.build_loop_from_polygon(hole.vertices(), merge))
            .collect();
        self.add_face(outer_loop, inner_loops)
    }

    /// Returns the face.
    ///
    /// # Panics
    ///
    /// Panics if the face is not in this solid.
    #[must_use]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[&id]
    }

    /// Iterates faces in identifier order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.values()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Plane of a face, fitted to its outer loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the outer loop is degenerate.
    pub fn face_plane(&self, id: FaceId) -> Result<Plane> {
        Plane::from_points(&self.loop_points(self.face(id).outer))
    }

    /// Removes a face and its loops, unlinking every half-edge they used.
    ///
    /// Vertices and edges stay in the solid.
    pub fn remove_face(&mut self, id: FaceId) -> Option<Face> {
        let face = self.faces.remove(&id)?;
        for loop_id in face.loops() {
            if let Some(lp) = self.loops.remove(loop_id) {
                for half in lp.halves() {
                    self.link(half, None);
                }
            }
        }
        Some(face)
    }

    /// Number of loops.
    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// Half-edges not used by any loop.
    pub fn open_halves(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.edges.values().flat_map(|e| {
            [Side::Left, Side::Right]
                .into_iter()
                .filter(|&side| e.half(side).loop_id.is_none())
                .map(|side| HalfEdgeId::new(e.id, side))
        })
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Solid: {} faces, {} edges, {} vertices",
            self.face_count(),
            self.edge_count(),
            self.vertex_count()
        )?;
        for face in self.faces() {
            let verts: Vec<String> = self.loop_vertices(face.outer).iter().map(ToString::to_string).collect();
            writeln!(f, "  face {}: [{}] holes={}", face.id, verts.join(", "), face.inner.len())?;
        }
        for edge in self.edges() {
            writeln!(f, "  edge {}: {} -> {}", edge.id, edge.start(), edge.end())?;
        }
        for v in self.vertices() {
            writeln!(f, "  vertex {}: ({}, {}, {})", v.id, v.point.x, v.point.y, v.point.z)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::rectangle(2.0, 2.0).unwrap()
    }

    #[test]
    fn polygon_loop_is_traversal_consistent() {
        let mut solid = Solid::new();
        let lp = solid.build_loop_from_polygon(square().vertices(), false);
        let halves: Vec<_> = solid.loop_data(lp).halves().collect();
        assert_eq!(halves.len(), 4);
        for i in 0..halves.len() {
            let next = halves[(i + 1) % halves.len()];
            assert_eq!(solid.half_end(halves[i]), solid.half_start(next));
            assert_eq!(solid.half(halves[i]).loop_id, Some(lp));
        }
    }

    #[test]
    fn merge_reuses_vertices_and_edges() {
        let mut solid = Solid::new();
        solid.add_polygon_face(&square(), &[], false);
        solid.add_polygon_face(&square().reversed(), &[], true);
        assert_eq!(solid.vertex_count(), 4);
        assert_eq!(solid.edge_count(), 4);
        assert_eq!(solid.open_halves().count(), 0);
    }

    #[test]
    fn reversed_face_walks_the_same_edges_backwards() {
        let mut solid = Solid::new();
        let up = solid.add_polygon_face(&square(), &[], false);
        let down = solid.add_polygon_face(&square().reversed(), &[], true);
        let mut forward = solid.loop_edges(solid.face(up).outer);
        let mut backward = solid.loop_edges(solid.face(down).outer);
        assert_eq!(forward.len(), 4);
        forward.sort();
        backward.sort();
        assert_eq!(forward, backward);
    }

    #[test]
    fn reuse_skips_linked_halves() {
        let mut solid = Solid::new();
        solid.add_polygon_face(&square(), &[], false);
        // Same winding again: every matching half is taken.
        solid.add_polygon_face(&square(), &[], true);
        assert_eq!(solid.vertex_count(), 4);
        assert_eq!(solid.edge_count(), 8);
    }

    #[test]
    fn splice_keeps_back_references() {
        let mut solid = Solid::new();
        let lp = solid.build_loop_from_polygon(square().vertices(), false);
        let first = solid.loop_data(lp).halves().next().unwrap();
        let a = solid.add_vertex(Point3::origin());
        let e = solid.add_edge(a, a);
        solid.loop_insert_after(lp, first, HalfEdgeId::left(e));
        assert_eq!(solid.loop_data(lp).position(HalfEdgeId::left(e)), Some(1));
        assert_eq!(solid.half(HalfEdgeId::left(e)).loop_id, Some(lp));

        assert!(solid.loop_remove(lp, HalfEdgeId::left(e)));
        assert_eq!(solid.half(HalfEdgeId::left(e)).loop_id, None);
        assert!(!solid.loop_remove(lp, HalfEdgeId::left(e)));
    }

    #[test]
    fn remove_face_unlinks_halves() {
        let mut solid = Solid::new();
        let face = solid.add_polygon_face(&square(), &[], false);
        assert!(solid.remove_face(face).is_some());
        assert_eq!(solid.face_count(), 0);
        assert_eq!(solid.loop_count(), 0);
        assert_eq!(solid.open_halves().count(), 8);
    }

    #[test]
    fn face_plane_follows_winding() {
        let mut solid = Solid::new();
        let up = solid.add_polygon_face(&square(), &[], false);
        let down = solid.add_polygon_face(&square().reversed(), &[], true);
        assert!(solid.face_plane(up).unwrap().normal().z > 0.99);
        assert!(solid.face_plane(down).unwrap().normal().z < -0.99);
    }

    #[test]
    fn display_lists_counts() {
        let mut solid = Solid::new();
        solid.add_polygon_face(&square(), &[], false);
        let text = solid.to_string();
        assert!(text.starts_with("Solid: 1 faces, 4 edges, 4 vertices"));
    }
}

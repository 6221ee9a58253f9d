use tracing::debug;

use crate::error::Result;
use crate::geometry::Profile;
use crate::topology::Solid;

/// Creates a zero-thickness solid from a profile.
///
/// The result has two coincident faces of opposite winding that share
/// every vertex and edge.
#[derive(Debug, Clone)]
pub struct Lamina {
    profile: Profile,
}

impl Lamina {
    /// Creates a new `Lamina` operation.
    #[must_use]
    pub fn new(profile: impl Into<Profile>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    /// Executes the operation, returning the new solid.
    ///
    /// # Errors
    ///
    /// Never fails for a validated profile; the `Result` matches the other
    /// construction operations.
    pub fn execute(&self) -> Result<Solid> {
        let mut solid = Solid::new();
        solid.add_polygon_face(self.profile.perimeter(), self.profile.voids(), false);
        let back = self.profile.reversed();
        solid.add_polygon_face(back.perimeter(), back.voids(), true);

        debug!(
            faces = solid.face_count(),
            edges = solid.edge_count(),
            vertices = solid.vertex_count(),
            "built lamina"
        );
        Ok(solid)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    #[test]
    fn two_faces_share_topology() {
        let solid = Lamina::new(Polygon::l_shape(4.0, 3.0, 1.0).unwrap()).execute().unwrap();
        assert_eq!(solid.face_count(), 2);
        assert_eq!(solid.vertex_count(), 6);
        assert_eq!(solid.edge_count(), 6);
        assert_eq!(solid.open_halves().count(), 0);
        solid.validate().unwrap();
    }

    #[test]
    fn faces_have_opposite_normals() {
        let solid = Lamina::new(Polygon::rectangle(2.0, 1.0).unwrap()).execute().unwrap();
        let normals: Vec<_> = solid
            .faces()
            .map(|f| *solid.face_plane(f.id).unwrap().normal())
            .collect();
        assert!((normals[0] + normals[1]).norm() < 1e-12);
    }

    #[test]
    fn holes_appear_on_both_faces() {
        let outer = Polygon::rectangle(4.0, 4.0).unwrap();
        let hole = Polygon::rectangle(1.0, 1.0).unwrap().reversed();
        let solid = Lamina::new(Profile::new(outer, vec![hole]).unwrap()).execute().unwrap();
        assert_eq!(solid.vertex_count(), 8);
        assert_eq!(solid.edge_count(), 8);
        for face in solid.faces() {
            assert_eq!(face.inner.len(), 1);
            let verts = solid.loop_vertices(face.outer).len() + solid.loop_vertices(face.inner[0]).len();
            assert_eq!(verts, 8);
        }
        solid.validate().unwrap();
    }
}

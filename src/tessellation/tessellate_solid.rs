use tracing::{debug, trace};

use crate::error::{Result, TessellationError};
use crate::geometry::Plane;
use crate::math::{Point2, Point3, Vector3, EPSILON, TOLERANCE};
use crate::topology::{Face, Solid};

use super::{CdtTriangulator, Mesh, MeshVertex, TessellationParams, Triangulation, Triangulator};

/// Tessellates all faces of a solid into a combined triangle mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct TessellateSolid {
    params: TessellationParams,
}

impl TessellateSolid {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(params: TessellationParams) -> Self {
        Self { params }
    }

    /// Executes the tessellation with the default triangulator.
    ///
    /// # Errors
    ///
    /// Returns an error if any face cannot be triangulated.
    pub fn execute(&self, solid: &Solid) -> Result<Mesh> {
        self.execute_with(solid, &CdtTriangulator)
    }

    /// Executes the tessellation with a caller-supplied triangulator.
    ///
    /// # Errors
    ///
    /// Returns an error if any face cannot be triangulated.
    pub fn execute_with(&self, solid: &Solid, triangulator: &impl Triangulator) -> Result<Mesh> {
        let mut mesh = Mesh::new();
        self.execute_into(solid, triangulator, &mut mesh)?;
        Ok(mesh)
    }

    /// Appends the tessellation of `solid` to an existing mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if any face cannot be triangulated.
    pub fn execute_into(&self, solid: &Solid, triangulator: &impl Triangulator, mesh: &mut Mesh) -> Result<()> {
        let before = mesh.triangle_count();
        for face in solid.faces() {
            let Some((plane, tri)) = triangulate_face(solid, face, triangulator, &self.params)? else {
                continue;
            };
            let points: Vec<Point3> = tri
                .vertices
                .iter()
                .map(|uv| {
                    let p = plane.evaluate(uv.x, uv.y);
                    self.params.transform.map_or(p, |t| t.apply_point(&p))
                })
                .collect();

            let normal = first_triangle_normal(&points, &tri.indices).unwrap_or_else(|| {
                self.params
                    .transform
                    .map_or(*plane.normal(), |t| t.apply_vector(plane.normal()).normalize())
            });
            let (u_axis, v_axis) = uv_basis(&normal);

            let mut local: Vec<Option<u32>> = vec![None; points.len()];
            for corners in tri.indices.chunks_exact(3) {
                let mut triangle = [0u32; 3];
                for (slot, &i) in triangle.iter_mut().zip(corners) {
                    let i = i as usize;
                    *slot = *local[i].get_or_insert_with(|| {
                        let p = points[i];
                        mesh.add_vertex(MeshVertex {
                            position: p,
                            normal,
                            uv: Point2::new(u_axis.dot(&p.coords), v_axis.dot(&p.coords)),
                            color: self.params.color,
                        })
                    });
                }
                mesh.add_triangle(triangle[0], triangle[1], triangle[2]);
            }
        }

        debug!(
            faces = solid.face_count(),
            triangles = mesh.triangle_count() - before,
            "tessellated solid"
        );
        Ok(())
    }
}

impl Solid {
    /// Tessellates the solid into a mesh. See [`TessellateSolid`].
    ///
    /// # Errors
    ///
    /// Returns an error if any face cannot be triangulated.
    pub fn to_mesh(&self, params: TessellationParams) -> Result<Mesh> {
        TessellateSolid::new(params).execute(self)
    }
}

/// Projects a face's loops into its plane and triangulates them.
///
/// Returns `None` for faces that are degenerate or produce no triangles,
/// and an error if the triangulator's indices do not fit its vertices.
pub(super) fn triangulate_face(
    solid: &Solid,
    face: &Face,
    triangulator: &impl Triangulator,
    params: &TessellationParams,
) -> Result<Option<(Plane, Triangulation)>> {
    let outer = solid.loop_points(face.outer);
    if outer.len() < 3 {
        trace!(face = %face.id, vertices = outer.len(), "skipping face with too few vertices");
        return Ok(None);
    }
    let Ok(plane) = Plane::from_points(&outer) else {
        trace!(face = %face.id, "skipping face with degenerate plane");
        return Ok(None);
    };

    let contours: Vec<Vec<Point2>> = face
        .loops()
        .map(|lp| solid.loop_points(lp).iter().map(|p| plane.project(p)).collect())
        .collect();
    let tri = triangulator.triangulate(&contours, params.winding_rule, params.suppress_empty)?;
    if tri.indices.len() % 3 != 0 {
        return Err(TessellationError::Failed(format!(
            "face {}: {} indices do not form whole triangles",
            face.id,
            tri.indices.len()
        ))
        .into());
    }
    if let Some(&bad) = tri.indices.iter().find(|&&i| i as usize >= tri.vertices.len()) {
        return Err(TessellationError::Failed(format!(
            "face {}: index {bad} is past the {} triangulated vertices",
            face.id,
            tri.vertices.len()
        ))
        .into());
    }
    if tri.vertices.len() < 3 || tri.triangle_count() == 0 {
        trace!(face = %face.id, "skipping face without triangles");
        return Ok(None);
    }
    Ok(Some((plane, tri)))
}

/// Unit normal of the first triangle, if it is not degenerate.
pub(super) fn first_triangle_normal(points: &[Point3], indices: &[u32]) -> Option<Vector3> {
    let [a, b, c] = [indices.first()?, indices.get(1)?, indices.get(2)?].map(|&i| points[i as usize]);
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    (len > TOLERANCE).then(|| n / len)
}

/// Tangent and bitangent spanning the plane with the given normal.
///
/// Horizontal faces use world X as the tangent; all others use the
/// horizontal direction `Z × n`.
fn uv_basis(normal: &Vector3) -> (Vector3, Vector3) {
    let u = if normal.dot(&Vector3::z()).abs() > 1.0 - EPSILON {
        Vector3::x()
    } else {
        Vector3::z().cross(normal).normalize()
    };
    (u, normal.cross(&u))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use crate::geometry::{Polygon, Profile};
    use crate::math::Transform;
    use crate::operations::{Extrude, Lamina};
    use crate::tessellation::{Color, PackBuffers, WindingRule};

    fn unit_cube() -> Solid {
        let square = Polygon::rectangle_from_corners(Point3::origin(), Point3::new(1.0, 1.0, 0.0)).unwrap();
        Extrude::new(square, Vector3::z(), 1.0).execute().unwrap()
    }

    #[test]
    fn cube_gives_twelve_triangles() {
        let mesh = unit_cube().to_mesh(TessellationParams::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertex_count(), 24);
        assert!((mesh.area() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn normals_point_outward() {
        let mesh = unit_cube().to_mesh(TessellationParams::default()).unwrap();
        let center = Point3::new(0.5, 0.5, 0.5);
        for v in &mesh.vertices {
            assert!(v.normal.dot(&(v.position - center)) > 0.0);
        }
    }

    #[test]
    fn holes_are_not_filled() {
        let outer = Polygon::rectangle(4.0, 4.0).unwrap();
        let hole = Polygon::rectangle(2.0, 2.0).unwrap().reversed();
        let solid = Lamina::new(Profile::new(outer, vec![hole]).unwrap()).execute().unwrap();
        let mesh = solid.to_mesh(TessellationParams::default()).unwrap();
        assert!((mesh.area() - 2.0 * 12.0).abs() < 1e-9);
    }

    #[test]
    fn horizontal_face_uses_world_axes_for_uv() {
        let solid = Lamina::new(Polygon::rectangle(2.0, 2.0).unwrap()).execute().unwrap();
        let mesh = solid.to_mesh(TessellationParams::default()).unwrap();
        let v = mesh.vertices.iter().find(|v| v.normal.z > 0.0).unwrap();
        assert!((v.uv.x - v.position.x).abs() < 1e-12);
    }

    #[test]
    fn vertical_face_uv_is_horizontal_then_up() {
        let (u, v) = uv_basis(&Vector3::new(0.0, -1.0, 0.0));
        assert!((u - Vector3::x()).norm() < 1e-12);
        assert!((v - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn transform_and_color_are_applied() {
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        let params = TessellationParams::default()
            .with_transform(Transform::translation(Vector3::new(10.0, 0.0, 0.0)))
            .with_color(red);
        let mesh = unit_cube().to_mesh(params).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.position.x >= 10.0 - 1e-12));
        assert!(mesh.vertices.iter().all(|v| v.color == Some(red)));
    }

    /// Returns a triangle that points past its own vertex list.
    struct OutOfRange;

    impl Triangulator for OutOfRange {
        fn triangulate(&self, _: &[Vec<Point2>], _: WindingRule, _: bool) -> Result<Triangulation> {
            Ok(Triangulation {
                vertices: vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)],
                indices: vec![0, 1, 7],
            })
        }
    }

    #[test]
    fn bad_triangulator_index_is_an_error() {
        let result = TessellateSolid::default().execute_with(&unit_cube(), &OutOfRange);
        assert!(matches!(
            result,
            Err(KernelError::Tessellation(TessellationError::Failed(_)))
        ));
        let result = PackBuffers::default().execute_with(&unit_cube(), &OutOfRange);
        assert!(result.is_err());
    }

    #[test]
    fn execute_into_appends() {
        let cube = unit_cube();
        let op = TessellateSolid::default();
        let mut mesh = op.execute(&cube).unwrap();
        op.execute_into(&cube, &CdtTriangulator, &mut mesh).unwrap();
        assert_eq!(mesh.triangle_count(), 24);
    }
}

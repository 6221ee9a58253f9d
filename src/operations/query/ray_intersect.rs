use crate::error::Result;
use crate::geometry::{Plane, Ray, RayHit};
use crate::math::polygon_2d::point_in_polygon_2d;
use crate::math::{Point3, EPSILON};
use crate::operations::SolidOperation;
use crate::tessellation::Mesh;
use crate::topology::{FaceId, LoopId, Solid};

impl Ray {
    /// Intersects the ray with the triangle `a b c` (Möller–Trumbore).
    ///
    /// Both sides of the triangle are hit. Hits closer than [`EPSILON`] to
    /// the origin or farther than `1 / EPSILON` are ignored.
    #[must_use]
    pub fn intersect_triangle(&self, a: &Point3, b: &Point3, c: &Point3) -> Option<RayHit> {
        let e1 = b - a;
        let e2 = c - a;
        let h = self.direction.cross(&e2);
        let det = e1.dot(&h);
        if det.abs() < EPSILON {
            return None;
        }
        let f = 1.0 / det;
        let s = self.origin - a;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(&e1);
        let v = f * self.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = f * e2.dot(&q);
        (t > EPSILON && t < 1.0 / EPSILON).then(|| RayHit { point: self.at(t), t })
    }

    /// Intersects the ray with an unbounded plane.
    ///
    /// Rays parallel to the plane, and planes behind the origin, miss.
    #[must_use]
    pub fn intersect_plane(&self, plane: &Plane) -> Option<RayHit> {
        let denom = plane.normal().dot(&self.direction);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = plane.normal().dot(&(plane.origin() - self.origin)) / denom;
        (t >= EPSILON).then(|| RayHit { point: self.at(t), t })
    }

    /// Intersects the ray with one face of a solid.
    ///
    /// The plane hit must lie inside the outer loop and outside every
    /// inner loop.
    #[must_use]
    pub fn intersect_face(&self, solid: &Solid, face: FaceId) -> Option<RayHit> {
        let plane = solid.face_plane(face).ok()?;
        let hit = self.intersect_plane(&plane)?;
        let uv = plane.project(&hit.point);
        let contour = |lp: LoopId| -> Vec<_> { solid.loop_points(lp).iter().map(|p| plane.project(p)).collect() };

        let face = solid.face(face);
        if !point_in_polygon_2d(&uv, &contour(face.outer)) {
            return None;
        }
        if face.inner.iter().any(|&hole| point_in_polygon_2d(&uv, &contour(hole))) {
            return None;
        }
        Some(hit)
    }

    /// Nearest hit against every face of a solid.
    #[must_use]
    pub fn intersect_solid(&self, solid: &Solid) -> Option<RayHit> {
        solid
            .faces()
            .filter_map(|f| self.intersect_face(solid, f.id))
            .min_by(|a, b| {
                let da = (a.point - self.origin).norm();
                let db = (b.point - self.origin).norm();
                da.total_cmp(&db)
            })
    }

    /// Builds the operation's solid and returns the nearest hit on it.
    ///
    /// # Errors
    ///
    /// Returns the error of [`SolidOperation::to_solid`].
    pub fn intersect_operation(&self, operation: &SolidOperation) -> Result<Option<RayHit>> {
        Ok(self.intersect_solid(&operation.to_solid()?))
    }

    /// Intersects two rays.
    ///
    /// Solves for the closest points of the two supporting lines and
    /// returns the one on `self`, so skew rays report their point of
    /// closest approach. Parallel rays never meet. Unless
    /// `ignore_direction` is set, both parameters must be non-negative.
    #[must_use]
    pub fn intersect_ray(&self, other: &Ray, ignore_direction: bool) -> Option<RayHit> {
        let cross = self.direction.cross(&other.direction);
        let denom = cross.norm_squared();
        if denom < EPSILON * EPSILON {
            return None;
        }
        let offset = other.origin - self.origin;
        let t1 = offset.cross(&other.direction).dot(&cross) / denom;
        let t2 = offset.cross(&self.direction).dot(&cross) / denom;
        if !ignore_direction && (t1 < 0.0 || t2 < 0.0) {
            return None;
        }
        Some(RayHit { point: self.at(t1), t: t1 })
    }

    /// First hit against the triangles of a terrain mesh, in triangle
    /// order.
    ///
    /// Height fields are hit at most once by a vertical ray, so the first
    /// hit is returned without sorting.
    #[must_use]
    pub fn intersect_topography(&self, topography: &Mesh) -> Option<RayHit> {
        topography
            .triangle_points()
            .find_map(|[a, b, c]| self.intersect_triangle(&a, &b, &c))
    }
}

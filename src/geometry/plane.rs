use crate::error::{GeometryError, Result};
use crate::math::{newell_normal, Point2, Point3, Vector3, TOLERANCE};

/// An infinite plane in 3D space.
///
/// Defined by an origin point, and two orthogonal direction vectors
/// (`u_dir`, `v_dir`). The normal is `u_dir × v_dir`.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a new plane from an origin and two direction vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vectors are zero-length
    /// or parallel (degenerate plane).
    pub fn new(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self> {
        let u_len = u_dir.norm();
        if u_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let u_dir = u_dir / u_len;

        let normal = u_dir.cross(&v_dir);
        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::Degenerate("plane directions are parallel".into()).into());
        }
        let normal = normal / normal_len;
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / len;

        // Reference vector must not be parallel to the normal
        let reference = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };

        let v_dir = normal.cross(&reference).normalize();
        let u_dir = v_dir.cross(&normal);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Fits a plane to a closed loop of points using Newell's method.
    ///
    /// The normal follows the right-hand rule over the loop order, so a
    /// loop that is counter-clockwise seen from the normal side projects
    /// counter-clockwise into `(u, v)`. The origin is the first point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the points are collinear or
    /// fewer than three.
    pub fn from_points(points: &[Point3]) -> Result<Self> {
        let normal = newell_normal(points)
            .ok_or_else(|| GeometryError::Degenerate("cannot fit a plane to the points".into()))?;
        Self::from_normal(points[0], normal)
    }

    /// Builds a plane from an already orthonormal frame.
    pub(crate) fn from_frame(origin: Point3, u_dir: Vector3, v_dir: Vector3, normal: Vector3) -> Self {
        Self {
            origin,
            u_dir,
            v_dir,
            normal,
        }
    }

    /// The XY plane through the world origin.
    #[must_use]
    pub fn xy() -> Self {
        Self::from_frame(Point3::origin(), Vector3::x(), Vector3::y(), Vector3::z())
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal vector of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Evaluates the plane at `(u, v)`.
    #[must_use]
    pub fn evaluate(&self, u: f64, v: f64) -> Point3 {
        self.origin + self.u_dir * u + self.v_dir * v
    }

    /// Projects a point into the plane's `(u, v)` parameterization.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let d = point - self.origin;
        Point2::new(d.dot(&self.u_dir), d.dot(&self.v_dir))
    }

    /// Signed distance from `point` to the plane.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_normal_builds_orthonormal_frame() {
        let plane = Plane::from_normal(Point3::origin(), Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(plane.normal().norm(), 1.0);
        assert!(plane.u_dir().dot(plane.normal()).abs() < TOLERANCE);
        assert!(plane.v_dir().dot(plane.normal()).abs() < TOLERANCE);
        assert_relative_eq!(plane.u_dir().cross(plane.v_dir()), *plane.normal(), epsilon = 1e-12);
    }

    #[test]
    fn from_normal_rejects_zero() {
        assert!(Plane::from_normal(Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn new_rejects_parallel_directions() {
        let result = Plane::new(Point3::origin(), Vector3::x(), Vector3::x() * 2.0);
        assert!(result.is_err());
    }

    #[test]
    fn from_points_follows_loop_orientation() {
        let pts = [
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ];
        let plane = Plane::from_points(&pts).unwrap();
        assert_relative_eq!(*plane.normal(), -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn project_then_evaluate_round_trips() {
        let plane = Plane::from_normal(Point3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 1.0)).unwrap();
        let p = plane.evaluate(0.5, -2.0);
        let uv = plane.project(&p);
        assert_relative_eq!(uv, Point2::new(0.5, -2.0), epsilon = 1e-12);
        assert!(plane.signed_distance(&p).abs() < 1e-12);
    }
}

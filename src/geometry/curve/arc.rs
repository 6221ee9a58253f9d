use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::Plane;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A circular arc lying in a plane.
///
/// The plane's origin is the arc center and its U axis marks angle zero.
/// Angles are in radians and increase counter-clockwise seen from the
/// plane normal; an arc whose end angle is below its start angle runs
/// clockwise.
#[derive(Debug, Clone)]
pub struct Arc {
    plane: Plane,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates an arc around `center` in the plane with the given normal.
    ///
    /// `ref_dir` is the direction of angle zero and must be perpendicular
    /// to `normal`.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive, the arc sweeps no
    /// angle, either vector is zero, or `ref_dir` is not perpendicular to
    /// `normal`.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if (end_angle - start_angle).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweeps no angle".into()).into());
        }
        let (Some(normal), Some(x)) = (normal.try_normalize(TOLERANCE), ref_dir.try_normalize(TOLERANCE)) else {
            return Err(GeometryError::ZeroVector.into());
        };
        if normal.dot(&x).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate("arc reference direction is not in its plane".into()).into());
        }

        Ok(Self {
            plane: Plane::new(center, x, normal.cross(&x))?,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Plane of the arc, centered on it.
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed angle swept from start to end, in radians.
    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Point3 {
        self.plane.evaluate(self.radius * t.cos(), self.radius * t.sin())
    }

    /// Unit tangent in the direction of travel.
    fn tangent(&self, t: f64) -> Result<Vector3> {
        let ccw = self.plane.v_dir() * t.cos() - self.plane.u_dir() * t.sin();
        Ok(ccw * self.sweep_angle().signum())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }

    fn is_closed(&self) -> bool {
        (self.sweep_angle().abs() - TAU).abs() < TOLERANCE
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep_angle().abs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn unit_arc(start: f64, end: f64) -> Arc {
        Arc::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x(), start, end).unwrap()
    }

    #[test]
    fn quarter_turn_reaches_y_axis() {
        let arc = unit_arc(0.0, PI);
        assert_relative_eq!(arc.evaluate(FRAC_PI_2), Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn tilted_plane_keeps_radius() {
        let arc = Arc::new(Point3::new(1.0, 2.0, 3.0), 2.5, Vector3::y(), Vector3::z(), 0.0, PI).unwrap();
        for i in 0..=8 {
            let p = arc.evaluate(PI * f64::from(i) / 8.0);
            assert_relative_eq!((p - arc.plane().origin()).norm(), 2.5, epsilon = 1e-12);
            assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn length_is_radius_times_angle() {
        let arc = Arc::new(Point3::origin(), 2.0, Vector3::z(), Vector3::x(), 0.0, FRAC_PI_2).unwrap();
        assert_relative_eq!(arc.length(), PI, epsilon = 1e-12);
    }

    #[test]
    fn clockwise_tangent_follows_travel() {
        let arc = unit_arc(FRAC_PI_2, 0.0);
        let t = arc.tangent(FRAC_PI_2).unwrap();
        assert_relative_eq!(t, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn full_turn_is_closed() {
        assert!(unit_arc(0.0, TAU).is_closed());
        assert!(!unit_arc(0.0, PI).is_closed());
    }

    #[test]
    fn rejects_bad_input() {
        let tilted = Arc::new(Point3::origin(), 1.0, Vector3::z(), Vector3::new(1.0, 0.0, 1.0), 0.0, 1.0);
        assert!(tilted.is_err());
        assert!(Arc::new(Point3::origin(), 0.0, Vector3::z(), Vector3::x(), 0.0, 1.0).is_err());
        assert!(Arc::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x(), 1.0, 1.0).is_err());
    }
}

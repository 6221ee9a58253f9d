use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Samples used to approximate the arc length.
const LENGTH_SAMPLES: usize = 64;

/// A Bezier curve of arbitrary degree over `t ∈ [0, 1]`.
#[derive(Debug, Clone)]
pub struct Bezier {
    control_points: Vec<Point3>,
}

impl Bezier {
    /// Creates a Bezier curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns an error with fewer than two control points.
    pub fn new(control_points: Vec<Point3>) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(GeometryError::Degenerate("bezier needs at least 2 control points".into()).into());
        }
        Ok(Self { control_points })
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// De Casteljau reduction down to the last two points.
    fn reduce(&self, t: f64) -> (Point3, Point3) {
        let mut pts = self.control_points.clone();
        while pts.len() > 2 {
            for i in 0..pts.len() - 1 {
                pts[i] = pts[i] + (pts[i + 1] - pts[i]) * t;
            }
            pts.pop();
        }
        (pts[0], pts[1])
    }
}

impl Curve for Bezier {
    fn evaluate(&self, t: f64) -> Point3 {
        let (a, b) = self.reduce(t);
        a + (b - a) * t
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let (a, b) = self.reduce(t);
        let d = b - a;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> f64 {
        let mut total = 0.0;
        let mut prev = self.evaluate(0.0);
        for i in 1..=LENGTH_SAMPLES {
            #[allow(clippy::cast_precision_loss)]
            let p = self.evaluate(i as f64 / LENGTH_SAMPLES as f64);
            total += (p - prev).norm();
            prev = p;
        }
        total
    }
}

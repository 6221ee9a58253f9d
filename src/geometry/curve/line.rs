use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A straight segment between two points.
///
/// Parameterized by arc length: `P(t) = start + t * direction`, `t ∈ [0, length]`.
#[derive(Debug, Clone)]
pub struct Line {
    start: Point3,
    end: Point3,
    direction: Vector3,
    length: f64,
}

impl Line {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        let d = end - start;
        let length = d.norm();
        if length < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            start,
            end,
            direction: d / length,
            length,
        })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Point3 {
        self.start + self.direction * t
    }

    fn tangent(&self, _t: f64) -> Result<Vector3> {
        Ok(self.direction)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length)
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> f64 {
        self.length
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn evaluates_by_arc_length() {
        let line = Line::new(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 5.0, 0.0)).unwrap();
        assert_relative_eq!(line.length(), 4.0);
        assert_relative_eq!(line.evaluate(1.5), Point3::new(1.0, 2.5, 0.0));
        assert_relative_eq!(line.evaluate(line.domain().t_max), *line.end());
    }

    #[test]
    fn rejects_zero_length() {
        assert!(Line::new(Point3::origin(), Point3::origin()).is_err());
    }
}

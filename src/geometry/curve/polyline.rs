use crate::error::{GeometryError, Result};
use crate::math::{Point3, Transform, Vector3, EPSILON, TOLERANCE};

use super::frames::{frame_at, mitered_frame};
use super::{Curve, CurveDomain};

/// An open chain of straight segments, parameterized by arc length.
#[derive(Debug, Clone)]
pub struct Polyline {
    vertices: Vec<Point3>,
    /// Cumulative arc length at each vertex.
    stations: Vec<f64>,
}

impl Polyline {
    /// Creates a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error with fewer than two vertices or a zero-length segment.
    pub fn new(vertices: Vec<Point3>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(GeometryError::Degenerate("polyline needs at least 2 vertices".into()).into());
        }
        let mut stations = Vec::with_capacity(vertices.len());
        let mut total = 0.0;
        stations.push(total);
        for pair in vertices.windows(2) {
            let len = (pair[1] - pair[0]).norm();
            if len < TOLERANCE {
                return Err(GeometryError::Degenerate("polyline has a zero-length segment".into()).into());
            }
            total += len;
            stations.push(total);
        }
        Ok(Self { vertices, stations })
    }

    /// Returns the vertices in order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Index of the segment containing arc length `t`.
    fn segment_at(&self, t: f64) -> usize {
        let last = self.vertices.len() - 2;
        self.stations[1..]
            .iter()
            .position(|&s| t <= s)
            .unwrap_or(last)
            .min(last)
    }

    /// Frames at the trimmed ends plus a mitered frame at every interior
    /// vertex that lies strictly between them.
    pub(super) fn frames(&self, from: f64, to: f64) -> Result<Vec<Transform>> {
        let domain = self.domain();
        let (t0, t1) = (domain.lerp(from), domain.lerp(to));
        let mut frames = vec![frame_at(self, t0)?];
        for i in 1..self.vertices.len() - 1 {
            let s = self.stations[i];
            if s > t0 + EPSILON && s < t1 - EPSILON {
                frames.push(mitered_frame(&self.vertices[i - 1], &self.vertices[i], &self.vertices[i + 1])?);
            }
        }
        frames.push(frame_at(self, t1)?);
        Ok(frames)
    }
}

impl Curve for Polyline {
    fn evaluate(&self, t: f64) -> Point3 {
        let i = self.segment_at(t);
        let a = self.vertices[i];
        let b = self.vertices[i + 1];
        let span = self.stations[i + 1] - self.stations[i];
        a + (b - a) * ((t - self.stations[i]) / span)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let i = self.segment_at(t);
        Ok((self.vertices[i + 1] - self.vertices[i]).normalize())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length())
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> f64 {
        self.stations.last().copied().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn elbow() -> Polyline {
        Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 3.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn evaluates_across_segments() {
        let pl = elbow();
        assert_relative_eq!(pl.length(), 7.0);
        assert_relative_eq!(pl.evaluate(2.0), Point3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(pl.evaluate(5.0), Point3::new(4.0, 1.0, 0.0));
        assert_relative_eq!(pl.evaluate(7.0), Point3::new(4.0, 3.0, 0.0));
    }

    #[test]
    fn frames_include_interior_corner() {
        let frames = elbow().frames(0.0, 1.0).unwrap();
        assert_eq!(frames.len(), 3);
        assert_relative_eq!(frames[1].origin(), Point3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn setback_past_corner_drops_it() {
        // 5/7 of the length lies beyond the corner at station 4
        let frames = elbow().frames(5.0 / 7.0, 1.0).unwrap();
        assert_eq!(frames.len(), 2);
        assert_relative_eq!(frames[0].origin(), Point3::new(4.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rejects_repeated_vertex() {
        let result = Polyline::new(vec![Point3::origin(), Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        assert!(result.is_err());
    }
}

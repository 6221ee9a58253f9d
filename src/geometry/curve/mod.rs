mod arc;
mod bezier;
mod frames;
mod line;
mod polyline;

pub use arc::Arc;
pub use bezier::Bezier;
pub use frames::{frame_at, mitered_frame, sampled_frames};
pub use line::Line;
pub use polyline::Polyline;

use crate::error::Result;
use crate::math::{Point3, Transform, Vector3};

use super::Polygon;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Maps a fraction in `[0, 1]` onto the domain.
    #[must_use]
    pub fn lerp(&self, fraction: f64) -> f64 {
        self.t_min + (self.t_max - self.t_min) * fraction
    }
}

/// Trait for bounded parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tangent is degenerate at `t`.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Returns the length of the curve.
    fn length(&self) -> f64;
}

/// A path along which a profile can be swept.
#[derive(Debug, Clone)]
pub enum SweepCurve {
    /// A straight segment.
    Line(Line),
    /// A circular arc.
    Arc(Arc),
    /// An open polyline.
    Polyline(Polyline),
    /// An open Bezier curve.
    Bezier(Bezier),
    /// A closed polygon; swept all the way around without caps.
    Polygon(Polygon),
}

/// Maximum angle between successive frames along an arc.
const ARC_FRAME_STEP_DEGREES: f64 = 10.0;

/// Number of frame intervals along a Bezier curve.
const BEZIER_FRAME_SEGMENTS: usize = 20;

impl SweepCurve {
    /// Length of the path.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line(c) => c.length(),
            Self::Arc(c) => c.length(),
            Self::Polyline(c) => c.length(),
            Self::Bezier(c) => c.length(),
            Self::Polygon(p) => p.perimeter(),
        }
    }

    /// Whether the path closes on itself (no caps are built).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Polygon(_))
    }

    /// Coordinate frames along the path between two setback fractions.
    ///
    /// `start` and `end` are the fractions of the path length trimmed from
    /// each end. Each frame's origin lies on the path and its Z axis
    /// points against the direction of travel. Closed polygons ignore the
    /// setbacks and return one mitered frame per vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if a tangent along the path is degenerate.
    pub fn frames(&self, start: f64, end: f64) -> Result<Vec<Transform>> {
        let (from, to) = (start, 1.0 - end);
        match self {
            Self::Line(c) => sampled_frames(c, from, to, 1),
            Self::Arc(c) => {
                let sweep = c.sweep_angle().abs().to_degrees() * (to - from);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let segments = (sweep / ARC_FRAME_STEP_DEGREES).ceil().max(1.0) as usize;
                sampled_frames(c, from, to, segments)
            }
            Self::Polyline(c) => c.frames(from, to),
            Self::Bezier(c) => sampled_frames(c, from, to, BEZIER_FRAME_SEGMENTS),
            Self::Polygon(p) => {
                let pts = p.vertices();
                let n = pts.len();
                (0..n)
                    .map(|i| mitered_frame(&pts[(i + n - 1) % n], &pts[i], &pts[(i + 1) % n]))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn line_frames_respect_setbacks() {
        let line = Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0)).unwrap();
        let frames = SweepCurve::Line(line).frames(0.1, 0.2).unwrap();
        assert_eq!(frames.len(), 2);
        assert_relative_eq!(frames[0].origin(), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(frames[1].origin(), Point3::new(8.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(frames[0].z_axis(), -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn quarter_arc_gets_ten_degree_frames() {
        let arc = Arc::new(
            Point3::origin(),
            5.0,
            Vector3::z(),
            Vector3::x(),
            0.0,
            std::f64::consts::FRAC_PI_2,
        )
        .unwrap();
        let frames = SweepCurve::Arc(arc).frames(0.0, 0.0).unwrap();
        assert_eq!(frames.len(), 10);
        for f in &frames {
            assert_relative_eq!((f.origin() - Point3::origin()).norm(), 5.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn closed_polygon_has_one_frame_per_vertex() {
        let square = Polygon::rectangle(4.0, 4.0).unwrap();
        let frames = SweepCurve::Polygon(square).frames(0.3, 0.3).unwrap();
        assert_eq!(frames.len(), 4);
    }

    #[test]
    fn polygon_length_is_perimeter() {
        let square = Polygon::rectangle(4.0, 4.0).unwrap();
        assert_relative_eq!(SweepCurve::Polygon(square).length(), 16.0);
    }
}

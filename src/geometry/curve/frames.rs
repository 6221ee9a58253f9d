use crate::error::Result;
use crate::math::{Point3, Transform, TOLERANCE};

use super::Curve;

/// Frame at curve parameter `t`, with its Z axis against the tangent.
///
/// # Errors
///
/// Returns an error if the tangent at `t` is degenerate.
pub fn frame_at(curve: &impl Curve, t: f64) -> Result<Transform> {
    let tangent = curve.tangent(t)?;
    Transform::from_origin_and_z(curve.evaluate(t), -tangent)
}

/// `segments + 1` evenly spaced frames between two domain fractions.
///
/// # Errors
///
/// Returns an error if a tangent along the curve is degenerate.
pub fn sampled_frames(curve: &impl Curve, from: f64, to: f64, segments: usize) -> Result<Vec<Transform>> {
    let domain = curve.domain();
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let fraction = from + (to - from) * (i as f64 / segments as f64);
            frame_at(curve, domain.lerp(fraction))
        })
        .collect()
}

/// Frame at a polyline corner whose XY plane bisects the two segments.
///
/// Projecting a cross-section onto this plane along either segment
/// produces a mitered joint.
///
/// # Errors
///
/// Returns an error if both neighboring segments have zero length.
pub fn mitered_frame(prev: &Point3, at: &Point3, next: &Point3) -> Result<Transform> {
    let incoming = at - prev;
    let outgoing = next - at;
    let incoming = if incoming.norm() < TOLERANCE {
        incoming
    } else {
        incoming.normalize()
    };
    let outgoing = if outgoing.norm() < TOLERANCE {
        outgoing
    } else {
        outgoing.normalize()
    };
    let bisector = incoming + outgoing;
    // A full reversal has no bisector; fall back to the incoming direction.
    let travel = if bisector.norm() < TOLERANCE {
        incoming
    } else {
        bisector
    };
    Transform::from_origin_and_z(*at, -travel)
}

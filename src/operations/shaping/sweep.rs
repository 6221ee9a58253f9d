use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Plane, Profile, SweepCurve};
use crate::math::{Transform, TOLERANCE};
use crate::topology::{EdgeId, HalfEdgeId, Solid};

/// Sweeps a profile along a curve to create a solid.
///
/// The profile is placed in each frame's XY plane. Open curves are capped
/// at both ends; closed polygons are swept all the way around without
/// caps.
#[derive(Debug, Clone)]
pub struct SweepAlongCurve {
    profile: Profile,
    curve: SweepCurve,
    start_setback: f64,
    end_setback: f64,
}

impl SweepAlongCurve {
    /// Creates a new `SweepAlongCurve` operation with no setbacks.
    #[must_use]
    pub fn new(profile: impl Into<Profile>, curve: SweepCurve) -> Self {
        Self {
            profile: profile.into(),
            curve,
            start_setback: 0.0,
            end_setback: 0.0,
        }
    }

    /// Trims the sweep back from the start and end of the curve by the
    /// given lengths.
    ///
    /// Setbacks that are negative or that together reach the curve
    /// length are both reset to zero.
    #[must_use]
    pub fn with_setbacks(mut self, start: f64, end: f64) -> Self {
        self.start_setback = start;
        self.end_setback = end;
        self
    }

    /// Executes the sweep into a new solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has no length, a frame along it is
    /// degenerate, or a cross-section cannot be projected onto the next
    /// frame.
    pub fn execute(&self) -> Result<Solid> {
        let length = self.curve.length();
        if length < TOLERANCE {
            return Err(OperationError::InvalidInput("sweep curve has no length".into()).into());
        }
        let (start, end) = self.effective_setbacks(length);
        let frames = self.curve.frames(start / length, end / length)?;
        if frames.len() < 2 {
            return Err(OperationError::Failed("sweep needs at least two frames".into()).into());
        }

        let mut solid = Solid::new();
        if self.curve.is_closed() {
            self.sweep_closed(&mut solid, &frames)?;
        } else {
            self.sweep_open(&mut solid, &frames)?;
        }

        debug!(
            frames = frames.len(),
            faces = solid.face_count(),
            edges = solid.edge_count(),
            vertices = solid.vertex_count(),
            "swept profile along curve"
        );
        Ok(solid)
    }

    fn effective_setbacks(&self, length: f64) -> (f64, f64) {
        let (start, end) = (self.start_setback, self.end_setback);
        if start < 0.0 || end < 0.0 || start + end >= length {
            (0.0, 0.0)
        } else {
            (start, end)
        }
    }

    /// Start cap, a chain of side faces through every frame, and an end
    /// cap closing the last boundary.
    fn sweep_open(&self, solid: &mut Solid, frames: &[Transform]) -> Result<()> {
        let section = self.profile.transformed(&frames[0]);
        let cap = solid.add_polygon_face(section.perimeter(), section.voids(), false);
        let loops: Vec<_> = solid.face(cap).loops().collect();
        let planes: Vec<Plane> = frames.iter().map(Transform::xy_plane).collect();

        let mut open = Vec::with_capacity(loops.len());
        for lp in loops {
            let boundary: Vec<HalfEdgeId> = solid.loop_data(lp).halves().collect();
            let end = solid.sweep_edges(boundary, &planes)?;
            open.push(end.iter().map(|h| h.edge).collect::<Vec<EdgeId>>());
        }
        solid.cap(&open, true)?;
        Ok(())
    }

    /// One open band per frame-to-frame segment, wrapping back to the
    /// first frame. The cross-section sits on the segment's midpoint
    /// frame and is projected along the segment onto both end planes.
    fn sweep_closed(&self, solid: &mut Solid, frames: &[Transform]) -> Result<()> {
        let n = frames.len();
        for i in 0..n {
            let (from, to) = (&frames[i], &frames[(i + 1) % n]);
            let travel = to.origin() - from.origin();
            let mid = nalgebra::center(&from.origin(), &to.origin());
            let section = self.profile.transformed(&Transform::from_origin_and_z(mid, -travel)?);
            let (start, end) = (from.xy_plane(), to.xy_plane());
            solid.sweep_polygon_between_planes(section.perimeter(), &travel, &start, &end)?;
            for void in section.voids() {
                solid.sweep_polygon_between_planes(void, &travel, &start, &end)?;
            }
        }
        Ok(())
    }
}

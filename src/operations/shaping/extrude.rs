use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::Profile;
use crate::math::{Transform, Vector3, TOLERANCE};
use crate::topology::Solid;

/// Extrudes a profile along a direction vector to create a solid.
#[derive(Debug, Clone)]
pub struct Extrude {
    profile: Profile,
    direction: Vector3,
    distance: f64,
    both_sides: bool,
    rotation: f64,
}

impl Extrude {
    /// Creates a new `Extrude` operation.
    #[must_use]
    pub fn new(profile: impl Into<Profile>, direction: Vector3, distance: f64) -> Self {
        Self {
            profile: profile.into(),
            direction,
            distance,
            both_sides: false,
            rotation: 0.0,
        }
    }

    /// Centers the extrusion on the profile plane, spreading half of the
    /// distance to each side.
    #[must_use]
    pub fn with_both_sides(mut self, both_sides: bool) -> Self {
        self.both_sides = both_sides;
        self
    }

    /// Rotates the profile about the direction, in degrees. Only applied
    /// together with [`with_both_sides`](Self::with_both_sides).
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Executes the extrusion into a new solid.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the direction is
    /// zero-length or the distance is not positive.
    pub fn execute(&self) -> Result<Solid> {
        let len = self.direction.norm();
        if len < TOLERANCE {
            return Err(OperationError::InvalidInput("extrude direction must be non-zero".into()).into());
        }
        if self.distance <= TOLERANCE {
            return Err(OperationError::InvalidInput("extrude distance must be positive".into()).into());
        }
        let direction = self.direction / len;

        // The start cap must face against the direction; flip profiles
        // wound the other way.
        let profile = if self.profile.perimeter().normal()?.dot(&direction) >= 0.0 {
            self.profile.clone()
        } else {
            self.profile.reversed()
        };
        let cap = profile.reversed();
        let cap = if self.both_sides {
            let placement = Transform::rotation(&direction, self.rotation)?
                .then(&Transform::translation(direction * (-self.distance / 2.0)));
            cap.transformed(&placement)
        } else {
            cap
        };

        let mut solid = Solid::new();
        let start = solid.add_polygon_face(cap.perimeter(), cap.voids(), false);
        let start = solid.face(start).clone();

        let end_outer = solid.sweep_loop(start.outer, &direction, self.distance)?;
        let mut end_inner = Vec::with_capacity(start.inner.len());
        for &hole in &start.inner {
            end_inner.push(solid.sweep_loop(hole, &direction, self.distance)?);
        }
        solid.add_face(end_outer, end_inner);

        debug!(
            faces = solid.face_count(),
            edges = solid.edge_count(),
            vertices = solid.vertex_count(),
            "extruded profile"
        );
        Ok(solid)
    }
}

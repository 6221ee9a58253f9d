use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A half-line with an origin and a direction.
///
/// The direction is not required to be unit length; hit parameters are
/// expressed in multiples of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Point3,
    /// Direction of travel.
    pub direction: Vector3,
}

/// A ray hit: the point and the ray parameter that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Intersection point.
    pub point: Point3,
    /// Ray parameter, `point = origin + t * direction`.
    pub t: f64,
}

impl Ray {
    /// Creates a ray.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the direction has no length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        if direction.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { origin, direction })
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

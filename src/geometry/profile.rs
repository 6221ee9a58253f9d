use crate::error::{GeometryError, Result};
use crate::math::{Transform, TOLERANCE};

use super::Polygon;

/// A planar cross-section: an outer perimeter and zero or more voids.
///
/// Voids are expected to be wound opposite to the perimeter.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    perimeter: Polygon,
    voids: Vec<Polygon>,
}

impl Profile {
    /// Creates a profile.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the perimeter or any void
    /// encloses no area.
    pub fn new(perimeter: Polygon, voids: Vec<Polygon>) -> Result<Self> {
        if perimeter.area() < TOLERANCE {
            return Err(GeometryError::Degenerate("profile perimeter has no area".into()).into());
        }
        if voids.iter().any(|v| v.area() < TOLERANCE) {
            return Err(GeometryError::Degenerate("profile void has no area".into()).into());
        }
        Ok(Self { perimeter, voids })
    }

    /// The outer boundary.
    #[must_use]
    pub fn perimeter(&self) -> &Polygon {
        &self.perimeter
    }

    /// The holes.
    #[must_use]
    pub fn voids(&self) -> &[Polygon] {
        &self.voids
    }

    /// Area of the perimeter minus the voids.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.perimeter.area() - self.voids.iter().map(Polygon::area).sum::<f64>()
    }

    /// Returns the profile with every polygon's winding reversed.
    #[must_use]
    pub fn reversed(&self) -> Profile {
        Self {
            perimeter: self.perimeter.reversed(),
            voids: self.voids.iter().map(Polygon::reversed).collect(),
        }
    }

    /// Returns the profile with every polygon transformed.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Profile {
        Self {
            perimeter: self.perimeter.transformed(transform),
            voids: self.voids.iter().map(|v| v.transformed(transform)).collect(),
        }
    }
}

impl From<Polygon> for Profile {
    fn from(perimeter: Polygon) -> Self {
        Self {
            perimeter,
            voids: Vec::new(),
        }
    }
}

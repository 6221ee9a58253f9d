use nalgebra::{Rotation3, Unit, Vector4};

use crate::error::{GeometryError, Result};
use crate::geometry::Plane;

use super::{Matrix4, Point3, Vector3, EPSILON, TOLERANCE};

/// A rigid transformation stored as a 4x4 homogeneous matrix.
///
/// Columns 0..3 hold the X, Y and Z axes of the local frame and column 3
/// holds its origin, so a transform doubles as a coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn translation(offset: Vector3) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset),
        }
    }

    /// A rotation of `degrees` about `axis` through the world origin.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the axis has zero length.
    pub fn rotation(axis: &Vector3, degrees: f64) -> Result<Self> {
        if axis.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), degrees.to_radians());
        Ok(Self {
            matrix: rotation.to_homogeneous(),
        })
    }

    /// Builds a frame from an origin and three axes (assumed orthonormal).
    #[must_use]
    pub fn from_axes(origin: Point3, x: Vector3, y: Vector3, z: Vector3) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            x.x, y.x, z.x, origin.x,
            x.y, y.y, z.y, origin.y,
            x.z, y.z, z.z, origin.z,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Builds a frame at `origin` whose Z axis is `z`.
    ///
    /// The X axis is horizontal (perpendicular to world Z) unless `z` is
    /// itself vertical, in which case world X is used. The Y axis then
    /// completes a right-handed frame, so for any non-vertical `z` it
    /// points "up".
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `z` has zero length.
    pub fn from_origin_and_z(origin: Point3, z: Vector3) -> Result<Self> {
        let len = z.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let z = z / len;
        let world_z = Vector3::z();
        let x = if z.dot(&world_z).abs() > 1.0 - EPSILON {
            Vector3::x()
        } else {
            world_z.cross(&z).normalize()
        };
        let y = z.cross(&x);
        Ok(Self::from_axes(origin, x, y, z))
    }

    /// Origin of the frame.
    #[must_use]
    pub fn origin(&self) -> Point3 {
        Point3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// X axis of the frame.
    #[must_use]
    pub fn x_axis(&self) -> Vector3 {
        self.column(0)
    }

    /// Y axis of the frame.
    #[must_use]
    pub fn y_axis(&self) -> Vector3 {
        self.column(1)
    }

    /// Z axis of the frame.
    #[must_use]
    pub fn z_axis(&self) -> Vector3 {
        self.column(2)
    }

    fn column(&self, c: usize) -> Vector3 {
        Vector3::new(self.matrix[(0, c)], self.matrix[(1, c)], self.matrix[(2, c)])
    }

    /// The plane spanned by the frame's X and Y axes.
    #[must_use]
    pub fn xy_plane(&self) -> Plane {
        Plane::from_frame(
            self.origin(),
            self.x_axis().normalize(),
            self.y_axis().normalize(),
            self.z_axis().normalize(),
        )
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply_point(&self, point: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Applies the transform to a direction (ignores translation).
    #[must_use]
    pub fn apply_vector(&self, vector: &Vector3) -> Vector3 {
        let v = self.matrix * Vector4::new(vector.x, vector.y, vector.z, 0.0);
        Vector3::new(v.x, v.y, v.z)
    }

    /// Returns the transform that applies `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Transform) -> Transform {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }
}

use crate::error::{GeometryError, Result};
use crate::math::intersect_3d::project_along;
use crate::math::{newell_normal, Point3, Transform, Vector3, TOLERANCE};

use super::Plane;

/// A closed planar polygon.
///
/// The last vertex connects back to the first; the closing vertex is not
/// repeated. Vertices are assumed coplanar but this is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] with fewer than three vertices.
    pub fn new(vertices: Vec<Point3>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()).into());
        }
        Ok(Self { vertices })
    }

    /// An axis-aligned rectangle in the XY plane, centered on the origin,
    /// wound counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is not positive.
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        if width <= TOLERANCE || height <= TOLERANCE {
            return Err(GeometryError::Degenerate("rectangle dimensions must be positive".into()).into());
        }
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::new(vec![
            Point3::new(-hw, -hh, 0.0),
            Point3::new(hw, -hh, 0.0),
            Point3::new(hw, hh, 0.0),
            Point3::new(-hw, hh, 0.0),
        ])
    }

    /// An axis-aligned rectangle in the XY plane spanning two corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the corners share an x or y coordinate.
    pub fn rectangle_from_corners(min: Point3, max: Point3) -> Result<Self> {
        if (max.x - min.x).abs() < TOLERANCE || (max.y - min.y).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("rectangle corners are aligned".into()).into());
        }
        let z = min.z;
        let (x0, x1) = (min.x.min(max.x), min.x.max(max.x));
        let (y0, y1) = (min.y.min(max.y), min.y.max(max.y));
        Self::new(vec![
            Point3::new(x0, y0, z),
            Point3::new(x1, y0, z),
            Point3::new(x1, y1, z),
            Point3::new(x0, y1, z),
        ])
    }

    /// An L-shaped polygon in the XY plane with its corner at the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if `thickness` does not fit within both legs.
    pub fn l_shape(width: f64, length: f64, thickness: f64) -> Result<Self> {
        if thickness <= TOLERANCE || thickness >= width || thickness >= length {
            return Err(GeometryError::Degenerate("L thickness must be smaller than both legs".into()).into());
        }
        Self::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, thickness, 0.0),
            Point3::new(thickness, thickness, 0.0),
            Point3::new(thickness, length, 0.0),
            Point3::new(0.0, length, 0.0),
        ])
    }

    /// Returns the vertices in order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Number of vertices (equal to the number of edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`: a polygon has at least three vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the polygon with its winding reversed.
    #[must_use]
    pub fn reversed(&self) -> Polygon {
        Self {
            vertices: self.vertices.iter().rev().copied().collect(),
        }
    }

    /// Returns the polygon with every vertex transformed.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Polygon {
        Self {
            vertices: self.vertices.iter().map(|p| transform.apply_point(p)).collect(),
        }
    }

    /// Unit normal by Newell's method; follows the winding (right-hand rule).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for collinear vertices.
    pub fn normal(&self) -> Result<Vector3> {
        newell_normal(&self.vertices)
            .ok_or_else(|| GeometryError::Degenerate("polygon has no area".into()).into())
    }

    /// The plane of the polygon, with its origin at the first vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for collinear vertices.
    pub fn plane(&self) -> Result<Plane> {
        Plane::from_points(&self.vertices)
    }

    /// Unsigned area of the polygon.
    #[must_use]
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = Vector3::zeros();
        for i in 0..n {
            let a = self.vertices[i].coords;
            let b = self.vertices[(i + 1) % n].coords;
            sum += a.cross(&b);
        }
        sum.norm() * 0.5
    }

    /// Total length of the closed boundary.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| (self.vertices[(i + 1) % n] - self.vertices[i]).norm())
            .sum()
    }

    /// Average of the vertices.
    #[must_use]
    pub fn centroid(&self) -> Point3 {
        #[allow(clippy::cast_precision_loss)]
        let n = self.vertices.len() as f64;
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / n)
    }

    /// Projects every vertex onto `plane` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParallelProjection`] if `direction` is
    /// parallel to the plane.
    pub fn project_along(&self, direction: &Vector3, plane: &Plane) -> Result<Polygon> {
        let vertices = self
            .vertices
            .iter()
            .map(|p| project_along(p, direction, plane).ok_or(GeometryError::ParallelProjection))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { vertices })
    }
}

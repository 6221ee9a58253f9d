pub mod intersect_3d;
pub mod polygon_2d;
pub mod transform;

pub use transform::Transform;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Tolerance below which a length or determinant is treated as zero.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for point equality, planarity, and ray parameter bounds.
pub const EPSILON: f64 = 1e-5;

/// Returns `true` if two points are within [`EPSILON`] of each other.
#[must_use]
pub fn points_almost_equal(a: &Point3, b: &Point3) -> bool {
    (a - b).norm() < EPSILON
}

/// Computes the normal of a closed polygon using Newell's method.
///
/// Returns `None` when the polygon is degenerate (collinear or fewer than
/// three points).
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Option<Vector3> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    let len = normal.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(normal / len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn newell_normal_of_ccw_square_points_up() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let n = newell_normal(&pts).unwrap();
        assert!((n.z - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn newell_normal_of_collinear_points_is_none() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(newell_normal(&pts).is_none());
    }

    #[test]
    fn almost_equal_uses_epsilon() {
        let a = Point3::new(1.0, 1.0, 1.0);
        assert!(points_almost_equal(&a, &Point3::new(1.0, 1.0, 1.000_001)));
        assert!(!points_almost_equal(&a, &Point3::new(1.0, 1.0, 1.001)));
    }
}

use crate::geometry::Plane;

use super::{Point3, Vector3, EPSILON, TOLERANCE};

/// Relationship of a line with a plane.
#[derive(Debug)]
pub enum LinePlaneRelation {
    /// Line intersects the plane at a single point.
    Point { point: Point3, t: f64 },
    /// Line is parallel to the plane (does not intersect).
    Parallel,
    /// Line lies entirely on the plane.
    OnPlane,
}

/// Computes the intersection of the infinite line `origin + t * dir` with a plane.
#[must_use]
pub fn line_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> LinePlaneRelation {
    let normal = plane.normal();
    let denom = normal.dot(dir);

    let diff = plane.origin() - origin;
    let numer = normal.dot(&diff);

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            LinePlaneRelation::OnPlane
        } else {
            LinePlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        let point = origin + dir * t;
        LinePlaneRelation::Point { point, t }
    }
}

/// Intersects the segment `start..end` with a plane.
///
/// Only crossings strictly inside the segment count: an intersection
/// within [`EPSILON`] of either endpoint is rejected, so a segment that
/// merely touches the plane at a vertex is not reported.
#[must_use]
pub fn segment_plane_crossing(start: &Point3, end: &Point3, plane: &Plane) -> Option<Point3> {
    let dir = end - start;
    match line_plane_intersect(start, &dir, plane) {
        LinePlaneRelation::Point { point, t } if (0.0..=1.0).contains(&t) => {
            if (point - start).norm() < EPSILON || (point - end).norm() < EPSILON {
                None
            } else {
                Some(point)
            }
        }
        _ => None,
    }
}

/// Projects `point` onto `plane` along `dir`.
///
/// Returns `None` when `dir` is parallel to the plane, even if `point`
/// already lies on it.
#[must_use]
pub fn project_along(point: &Point3, dir: &Vector3, plane: &Plane) -> Option<Point3> {
    match line_plane_intersect(point, dir, plane) {
        LinePlaneRelation::Point { point, .. } => Some(point),
        LinePlaneRelation::OnPlane | LinePlaneRelation::Parallel => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn xy_plane() -> Plane {
        Plane::from_normal(p(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0)).unwrap()
    }

    #[test]
    fn line_parallel_to_plane() {
        let result = line_plane_intersect(&p(0.0, 0.0, 5.0), &v(1.0, 0.0, 0.0), &xy_plane());
        assert!(matches!(result, LinePlaneRelation::Parallel));
    }

    #[test]
    fn line_on_plane() {
        let result = line_plane_intersect(&p(1.0, 2.0, 0.0), &v(1.0, 0.0, 0.0), &xy_plane());
        assert!(matches!(result, LinePlaneRelation::OnPlane));
    }

    #[test]
    fn line_oblique_to_plane() {
        let result = line_plane_intersect(&p(0.0, 0.0, -3.0), &v(1.0, 1.0, 1.0), &xy_plane());
        match result {
            LinePlaneRelation::Point { point, t } => {
                assert!((t - 3.0).abs() < TOLERANCE);
                assert!(point.z.abs() < TOLERANCE);
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn segment_crossing_in_the_middle() {
        let hit = segment_plane_crossing(&p(0.0, 0.0, -1.0), &p(0.0, 0.0, 3.0), &xy_plane());
        let hit = hit.unwrap();
        assert!(hit.z.abs() < TOLERANCE);
    }

    #[test]
    fn segment_touching_plane_at_endpoint_is_ignored() {
        let hit = segment_plane_crossing(&p(0.0, 0.0, 0.0), &p(0.0, 0.0, 3.0), &xy_plane());
        assert!(hit.is_none());
    }

    #[test]
    fn segment_short_of_plane_is_ignored() {
        let hit = segment_plane_crossing(&p(0.0, 0.0, 1.0), &p(0.0, 0.0, 3.0), &xy_plane());
        assert!(hit.is_none());
    }

    #[test]
    fn project_along_oblique_direction() {
        let q = project_along(&p(0.0, 0.0, 2.0), &v(1.0, 0.0, -1.0), &xy_plane()).unwrap();
        assert!((q.x - 2.0).abs() < TOLERANCE);
        assert!(q.z.abs() < TOLERANCE);
    }

    #[test]
    fn project_along_in_plane_direction_is_parallel() {
        assert!(project_along(&p(1.0, 2.0, 0.0), &v(1.0, 0.0, 0.0), &xy_plane()).is_none());
        assert!(project_along(&p(1.0, 2.0, 4.0), &v(1.0, 0.0, 0.0), &xy_plane()).is_none());
    }
}

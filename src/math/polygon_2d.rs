use super::Point2;

/// Computes the signed area of a closed 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Winding number of `point` with respect to the closed polygon `verts`.
///
/// Counter-clockwise loops around the point contribute `+1`, clockwise
/// loops `-1`. Zero means the point is outside.
#[must_use]
pub fn winding_number_2d(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];

        if a.y <= point.y {
            if b.y > point.y && cross_2d(&a, &b, point) > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && cross_2d(&a, &b, point) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Returns `true` if `point` lies inside the polygon (non-zero winding).
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, verts: &[Point2]) -> bool {
    verts.len() >= 3 && winding_number_2d(point, verts) != 0
}

/// 2D cross product of `(b - a)` and `(p - a)`.
#[inline]
fn cross_2d(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

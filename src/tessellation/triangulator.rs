use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation as _};

use crate::error::{Result, TessellationError};
use crate::math::polygon_2d::{signed_area_2d, winding_number_2d};
use crate::math::{Point2, TOLERANCE};

/// Rule deciding which regions enclosed by a set of contours are filled,
/// from the sum of the contours' winding numbers around the region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindingRule {
    /// Odd winding numbers.
    Odd,
    /// Any non-zero winding number.
    NonZero,
    /// Strictly positive winding numbers.
    #[default]
    Positive,
    /// Strictly negative winding numbers.
    Negative,
    /// Winding numbers of magnitude two or more.
    AbsGeqTwo,
}

impl WindingRule {
    /// Whether a region with the given winding number is filled.
    #[must_use]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            Self::Odd => winding % 2 != 0,
            Self::NonZero => winding != 0,
            Self::Positive => winding > 0,
            Self::Negative => winding < 0,
            Self::AbsGeqTwo => winding.abs() >= 2,
        }
    }
}

/// Output of a triangulator: its own vertex set and a flat list of
/// triangle indices into it, three per triangle.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    /// Vertices used by the triangles. May include points not present in
    /// the input contours.
    pub vertices: Vec<Point2>,
    /// Vertex indices, three per triangle, counter-clockwise.
    pub indices: Vec<u32>,
}

impl Triangulation {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Fills planar contours with triangles.
///
/// Implementations are stateless per call and may be shared between
/// faces.
pub trait Triangulator {
    /// Triangulates the regions of `contours` selected by `rule`.
    ///
    /// With `suppress_empty`, contours that enclose no area are ignored
    /// and zero-area triangles are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::Failed`] if the contours cannot be
    /// triangulated.
    fn triangulate(&self, contours: &[Vec<Point2>], rule: WindingRule, suppress_empty: bool) -> Result<Triangulation>;
}

/// Triangulator backed by a constrained Delaunay triangulation.
///
/// Every contour edge becomes a constraint; each resulting triangle is
/// kept or dropped by the winding number of its centroid.
#[derive(Debug, Clone, Copy, Default)]
pub struct CdtTriangulator;

impl Triangulator for CdtTriangulator {
    fn triangulate(&self, contours: &[Vec<Point2>], rule: WindingRule, suppress_empty: bool) -> Result<Triangulation> {
        let mut kept: Vec<&[Point2]> = Vec::with_capacity(contours.len());
        for contour in contours {
            if contour.len() < 3 || signed_area_2d(contour).abs() < TOLERANCE {
                if suppress_empty {
                    continue;
                }
                return Err(TessellationError::Failed("contour encloses no area".into()).into());
            }
            kept.push(contour);
        }

        let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
        for contour in &kept {
            insert_constraint_loop(&mut cdt, contour)?;
        }

        let mut remap: Vec<Option<u32>> = vec![None; cdt.num_vertices()];
        let mut out = Triangulation::default();
        for face in cdt.inner_faces() {
            let corners = face.vertices().map(|v| {
                let p = v.position();
                Point2::new(p.x, p.y)
            });
            if suppress_empty && signed_area_2d(&corners).abs() < TOLERANCE {
                continue;
            }
            let centroid = Point2::from((corners[0].coords + corners[1].coords + corners[2].coords) / 3.0);
            let winding: i32 = kept.iter().map(|c| winding_number_2d(&centroid, c)).sum();
            if !rule.is_inside(winding) {
                continue;
            }

            for (v, corner) in face.vertices().iter().zip(corners) {
                let slot = &mut remap[v.fix().index()];
                let index = match *slot {
                    Some(index) => index,
                    None => {
                        let index = u32::try_from(out.vertices.len())
                            .map_err(|_| TessellationError::Failed("too many vertices".into()))?;
                        out.vertices.push(corner);
                        *slot = Some(index);
                        index
                    }
                };
                out.indices.push(index);
            }
        }
        Ok(out)
    }
}

fn insert_constraint_loop(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    points: &[Point2],
) -> Result<()> {
    let mut handles = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed("contour edges cross each other".into()).into());
        }
        cdt.add_constraint(from, to);
    }
    Ok(())
}

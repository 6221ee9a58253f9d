use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::math::Point3;
use crate::topology::Solid;

use super::tessellate_solid::{first_triangle_normal, triangulate_face};
use super::{CdtTriangulator, TessellationParams, Triangulator};

/// Flat vertex and index buffers ready for upload to a renderer.
///
/// Each vertex contributes three floats to `positions` and `normals` and
/// two to `uvs`. Indices are 16-bit.
#[derive(Debug, Clone, Default)]
pub struct GraphicsBuffers {
    /// Vertex positions, `x y z` per vertex.
    pub positions: Vec<f32>,
    /// Vertex normals, `x y z` per vertex, shared across each face.
    pub normals: Vec<f32>,
    /// Texture coordinates, `u v` per vertex.
    pub uvs: Vec<f32>,
    /// Triangle indices into the vertex arrays, three per triangle.
    pub indices: Vec<u16>,
    /// Per-vertex RGBA, present only when a color was requested.
    pub colors: Vec<f32>,
    /// Component-wise minimum of all positions.
    pub position_min: [f64; 3],
    /// Component-wise maximum of all positions.
    pub position_max: [f64; 3],
}

impl GraphicsBuffers {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_vertex(&mut self, position: &Point3, normal: [f32; 3], color: Option<[f32; 4]>) {
        if self.positions.is_empty() {
            self.position_min = [f64::MAX; 3];
            self.position_max = [f64::MIN; 3];
        }
        for axis in 0..3 {
            self.position_min[axis] = self.position_min[axis].min(position[axis]);
            self.position_max[axis] = self.position_max[axis].max(position[axis]);
        }
        self.positions
            .extend([position.x as f32, position.y as f32, position.z as f32]);
        self.normals.extend(normal);
        self.uvs.extend([0.0, 0.0]);
        if let Some(color) = color {
            self.colors.extend(color);
        }
    }
}

/// Packs the tessellation of a solid into [`GraphicsBuffers`].
///
/// Every face gets one flat normal, taken from its first triangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackBuffers {
    params: TessellationParams,
}

impl PackBuffers {
    /// Creates a new `PackBuffers` operation.
    #[must_use]
    pub fn new(params: TessellationParams) -> Self {
        Self { params }
    }

    /// Executes the packing with the default triangulator.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::IndexOverflow`] if an index does not
    /// fit in 16 bits, or the triangulator's error.
    pub fn execute(&self, solid: &Solid) -> Result<GraphicsBuffers> {
        self.execute_with(solid, &CdtTriangulator)
    }

    /// Executes the packing with a caller-supplied triangulator.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::IndexOverflow`] if an index does not
    /// fit in 16 bits, or the triangulator's error.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute_with(&self, solid: &Solid, triangulator: &impl Triangulator) -> Result<GraphicsBuffers> {
        let mut buffers = GraphicsBuffers::default();
        let color = self.params.color.map(|c| [c.r, c.g, c.b, c.a]);
        let mut cursor = 0usize;

        for face in solid.faces() {
            let Some((plane, tri)) = triangulate_face(solid, face, triangulator, &self.params)? else {
                continue;
            };
            let points: Vec<Point3> = tri
                .vertices
                .iter()
                .map(|uv| {
                    let p = plane.evaluate(uv.x, uv.y);
                    self.params.transform.map_or(p, |t| t.apply_point(&p))
                })
                .collect();
            let n = first_triangle_normal(&points, &tri.indices).unwrap_or(*plane.normal());
            let normal = [n.x as f32, n.y as f32, n.z as f32];

            for p in &points {
                buffers.add_vertex(p, normal, color);
            }
            for &i in &tri.indices {
                let index = cursor + i as usize;
                let packed = u16::try_from(index).map_err(|_| TessellationError::IndexOverflow { index })?;
                buffers.indices.push(packed);
            }
            cursor += points.len();
        }

        debug!(
            vertices = buffers.vertex_count(),
            indices = buffers.indices.len(),
            "packed graphics buffers"
        );
        Ok(buffers)
    }
}

impl Solid {
    /// Packs the solid into graphics buffers with default parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::IndexOverflow`] if the solid needs more
    /// than 65536 vertices.
    pub fn to_graphics_buffers(&self) -> Result<GraphicsBuffers> {
        PackBuffers::default().execute(self)
    }
}

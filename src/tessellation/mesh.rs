use crate::math::{Point2, Point3, Vector3};

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha (opacity).
    pub a: f32,
}

impl Color {
    /// Creates a color.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A mesh vertex with its shading attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshVertex {
    /// World-space position.
    pub position: Point3,
    /// Unit normal of the face the vertex belongs to.
    pub normal: Vector3,
    /// Texture coordinate in the face's tangent/bitangent basis.
    pub uv: Point2,
    /// Flat color, if one was requested.
    pub color: Option<Color>,
}

/// A triangle mesh.
///
/// Vertices and triangles keep their insertion order. Faces tessellated
/// into the same mesh do not share vertices.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertices in insertion order.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices (each triple defines a counter-clockwise triangle).
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_vertex(&mut self, vertex: MeshVertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Appends a triangle over existing vertex indices.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    /// Appends another mesh, offsetting its triangle indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles
            .extend(other.triangles.iter().map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]));
    }

    /// Corner positions of every triangle.
    pub fn triangle_points(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles.iter().map(|t| t.map(|i| self.vertices[i as usize].position))
    }

    /// Total area of all triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangle_points()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f64, y: f64) -> MeshVertex {
        MeshVertex {
            position: Point3::new(x, y, 0.0),
            normal: Vector3::z(),
            uv: Point2::new(x, y),
            color: None,
        }
    }

    fn unit_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(vertex(0.0, 0.0));
        let b = mesh.add_vertex(vertex(1.0, 0.0));
        let c = mesh.add_vertex(vertex(0.0, 1.0));
        mesh.add_triangle(a, b, c);
        mesh
    }

    #[test]
    fn merge_offsets_indices() {
        let mut mesh = unit_triangle();
        mesh.merge(&unit_triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangles[1], [3, 4, 5]);
        assert!((mesh.area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_mesh_has_no_area() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.area().abs() < f64::EPSILON);
    }
}

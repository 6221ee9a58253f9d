mod graphics_buffers;
mod mesh;
mod tessellate_solid;
mod triangulator;

pub use graphics_buffers::{GraphicsBuffers, PackBuffers};
pub use mesh::{Color, Mesh, MeshVertex};
pub use tessellate_solid::TessellateSolid;
pub use triangulator::{CdtTriangulator, Triangulation, Triangulator, WindingRule};

use crate::math::Transform;

/// Parameters controlling tessellation.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Which regions of a face's loops are filled.
    pub winding_rule: WindingRule,
    /// Skip loops and triangles that enclose no area instead of failing.
    pub suppress_empty: bool,
    /// Transform applied to every emitted position.
    pub transform: Option<Transform>,
    /// Flat color given to every emitted vertex.
    pub color: Option<Color>,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            winding_rule: WindingRule::Positive,
            suppress_empty: true,
            transform: None,
            color: None,
        }
    }
}

impl TessellationParams {
    /// Sets the winding rule.
    #[must_use]
    pub fn with_winding_rule(mut self, rule: WindingRule) -> Self {
        self.winding_rule = rule;
        self
    }

    /// Sets whether empty loops and triangles are skipped.
    #[must_use]
    pub fn with_suppress_empty(mut self, suppress: bool) -> Self {
        self.suppress_empty = suppress;
        self
    }

    /// Transforms every emitted position.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Colors every emitted vertex.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

use crate::error::Result;
use crate::tessellation::{TessellateSolid, TessellationParams};
use crate::topology::Solid;

/// Computes the total surface area of a solid.
///
/// Sums the areas of the triangles produced by tessellating every face,
/// so holes are excluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceArea {
    params: TessellationParams,
}

impl SurfaceArea {
    /// Creates a new `SurfaceArea` query with default tessellation parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets custom tessellation parameters.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the total surface area.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid cannot be tessellated.
    pub fn execute(&self, solid: &Solid) -> Result<f64> {
        let mesh = TessellateSolid::new(self.params).execute(solid)?;
        Ok(mesh.area())
    }
}

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{KernelError, Result};
pub use geometry::{Plane, Polygon, Profile, Ray};
pub use operations::SolidOperation;
pub use tessellation::{GraphicsBuffers, Mesh, TessellationParams};
pub use topology::Solid;

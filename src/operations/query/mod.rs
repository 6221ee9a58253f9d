mod area;
mod is_valid;
mod ray_intersect;

pub use area::SurfaceArea;
pub use is_valid::IsValid;

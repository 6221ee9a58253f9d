mod extrude;
mod primitives;
mod sweep;

pub use extrude::Extrude;
pub use sweep::SweepAlongCurve;

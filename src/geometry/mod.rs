pub mod curve;
mod plane;
mod polygon;
mod profile;
mod ray;

pub use curve::{Arc, Bezier, Curve, CurveDomain, Line, Polyline, SweepCurve};
pub use plane::Plane;
pub use polygon::Polygon;
pub use profile::Profile;
pub use ray::{Ray, RayHit};

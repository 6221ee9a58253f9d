pub mod edge;
pub mod face;
mod ids;
pub mod loops;
pub mod solid;
pub mod vertex;

pub use edge::{Edge, HalfEdge, HalfEdgeId, Side};
pub use face::Face;
pub use ids::{EdgeId, FaceId, VertexId};
pub use loops::{Loop, LoopId};
pub use solid::Solid;
pub use vertex::Vertex;

pub mod face;
pub mod polygon;

pub use face::{Face, FaceGroup, Vertex};
pub use polygon::{Point, Polygon};

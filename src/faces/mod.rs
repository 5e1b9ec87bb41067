pub mod builder;

pub use builder::{PolygonMap, build_polygons};

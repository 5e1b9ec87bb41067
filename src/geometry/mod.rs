pub mod bounds;
pub mod containment;

pub use bounds::Bounds;
pub use containment::point_in_polygon;

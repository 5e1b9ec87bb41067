//! castrays - Classify integer grid points against polygons projected from mesh faces

pub mod config;
pub mod domain;
pub mod error;
pub mod faces;
pub mod geometry;
pub mod grid;
pub mod query;

pub use error::CastError;
pub use grid::{ContainmentMap, GridRange};
pub use query::{QueryRequest, cast_rays};

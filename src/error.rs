use thiserror::Error;

pub type Result<T> = std::result::Result<T, CastError>;

/// Failures of the polygon builder and evaluator
#[derive(Debug, Error, PartialEq)]
pub enum CastError {
    /// A vertex broke the input contract (arity or non-finite coordinates)
    #[error(
        "Invalid input at group {group} ({group_id:?}), face {face}, vertex {vertex}: {reason}"
    )]
    InvalidInput {
        group: usize,
        group_id: String,
        face: usize,
        vertex: usize,
        reason: String,
    },

    /// The grid has more cells than can be addressed or allocated
    #[error("Grid x {min_x}..={max_x}, y {min_y}..={max_y} is too large to evaluate")]
    GridTooLarge {
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    },
}

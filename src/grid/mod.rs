pub mod evaluator;
pub mod range;
pub mod render;

pub use evaluator::{ContainmentMap, evaluate};
pub use range::GridRange;
pub use render::{AsciiStyle, render_ascii};

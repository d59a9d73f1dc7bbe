//! Score types for representing solution quality
//!
//! Scores are compared to decide which move a step commits. All score
//! types are immutable `Copy` values with a total order.

#[macro_use]
mod macros;

mod hard_soft;
mod simple;
mod traits;

#[cfg(test)]
mod tests;

pub use hard_soft::HardSoftScore;
pub use simple::SimpleScore;
pub use traits::{ParseableScore, Score, ScoreParseError};

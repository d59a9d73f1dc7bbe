//! Score director implementations.

mod incremental;
mod simple;
mod traits;

#[cfg(test)]
mod tests;

pub use incremental::{IncrementalScoreCalculator, IncrementalScoreDirector};
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;

//! Score directors for LocalForge.
//!
//! A score director owns the working solution, is notified around every
//! planning variable change and calculates the score, either by full
//! recalculation ([`SimpleScoreDirector`]) or incrementally through an
//! [`IncrementalScoreCalculator`] ([`IncrementalScoreDirector`]).
//!
//! Every director can replicate itself for a move evaluation thread with
//! [`ScoreDirector::create_child_thread`] and can recompute its score from
//! scratch, which the assertion helpers in [`assertion`] use to detect
//! score corruption.

pub mod assertion;
pub mod director;

pub use director::{
    IncrementalScoreCalculator, IncrementalScoreDirector, ScoreDirector, SimpleScoreDirector,
};

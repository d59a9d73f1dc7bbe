//! Scope hierarchy for solver execution.
//!
//! Scopes hold the state of the solving process at each level:
//! - [`SolverScope`]: the whole solve, owns the score director
//! - [`PhaseScope`]: one phase
//! - [`StepScope`]: one step within a phase
//! - [`MoveScope`]: one evaluated move within a step

mod move_scope;
mod phase;
mod solver;
mod step;

pub use move_scope::MoveScope;
pub use phase::{PhaseScope, ProblemScale};
pub use solver::SolverScope;
pub use step::StepScope;

#[cfg(test)]
mod tests;

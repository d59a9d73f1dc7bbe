//! Solver phases.
//!
//! A solve runs its phases in order over one solver scope. The only phase
//! kind is local search, which improves the working solution step by step.

pub mod localsearch;

use std::fmt::Debug;

use localforge_core::{PlanningSolution, Result};
use localforge_scoring::ScoreDirector;

use crate::scope::SolverScope;
use crate::termination::Termination;

/// A phase of the solving process.
///
/// Object safe: a solver holds its phases as `Box<dyn Phase<S, D>>`.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
pub trait Phase<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    fn solving_started(&mut self) {}

    /// Executes this phase.
    ///
    /// Modifies the working solution in the solver scope and recalls the
    /// best solution whenever it improves. `solver_termination` is checked
    /// together with the phase's own termination.
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>, solver_termination: &dyn Termination<S, D>) -> Result<()>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;

    fn solving_ended(&mut self) {}
}

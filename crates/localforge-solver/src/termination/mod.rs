//! Termination conditions for solving and for single phases.
//!
//! Every termination answers two questions: should the whole solve stop,
//! measured from solving start, and should the current phase stop,
//! measured from phase start. A phase stops when its own termination
//! fires, when the solver termination fires, or when termination was
//! requested from outside.

mod best_score;
mod chained;
mod composite;
mod step_count;
mod time;

use std::fmt::Debug;

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope};

pub use best_score::{BestScoreFeasibleTermination, BestScoreTermination};
pub use chained::{ChainedTermination, NeverTermination};
pub use composite::{AndTermination, OrTermination};
pub use step_count::{StepCountTermination, UnimprovedStepCountTermination};
pub use time::{TimeTermination, UnimprovedTimeTermination};

/// Trait for determining when to stop solving.
///
/// Object safe: phases and the solver hold terminations as
/// `Box<dyn Termination<S, D>>`.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
pub trait Termination<S: PlanningSolution, D: ScoreDirector<S>>: Send + Sync + Debug {
    /// Returns true if solving as a whole should stop.
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool;

    /// Returns true if the current phase should stop.
    fn is_phase_terminated(
        &self,
        solver_scope: &SolverScope<S, D>,
        phase_scope: &PhaseScope<S>,
    ) -> bool;
}

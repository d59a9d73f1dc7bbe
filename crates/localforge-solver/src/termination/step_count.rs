//! Step count terminations.

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Stops after `limit` steps: over all phases for the solver, within the
/// phase for a phase.
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for StepCountTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.total_step_count() >= self.limit
    }

    fn is_phase_terminated(&self, _solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        phase_scope.step_count() >= self.limit
    }
}

/// Stops once `limit` steps passed since the last new best score.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for UnimprovedStepCountTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.unimproved_step_count() >= self.limit
    }

    fn is_phase_terminated(&self, _solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        phase_scope.unimproved_step_count() >= self.limit
    }
}

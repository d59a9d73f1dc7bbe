//! Termination seen by a running phase.

use std::fmt::Debug;

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Chains the phase termination to the solver termination.
///
/// The phase ends when its own termination fires, when the solver
/// termination fires, or when the terminate-early flag was set.
pub struct ChainedTermination<'a, S: PlanningSolution, D: ScoreDirector<S>> {
    phase_termination: Option<&'a dyn Termination<S, D>>,
    solver_termination: &'a dyn Termination<S, D>,
}

impl<'a, S: PlanningSolution, D: ScoreDirector<S>> ChainedTermination<'a, S, D> {
    pub fn new(
        phase_termination: Option<&'a dyn Termination<S, D>>,
        solver_termination: &'a dyn Termination<S, D>,
    ) -> Self {
        Self {
            phase_termination,
            solver_termination,
        }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Debug for ChainedTermination<'_, S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedTermination")
            .field("phase_termination", &self.phase_termination)
            .field("solver_termination", &self.solver_termination)
            .finish()
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for ChainedTermination<'_, S, D> {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.is_terminate_early() || self.solver_termination.is_solver_terminated(solver_scope)
    }

    fn is_phase_terminated(&self, solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        self.is_solver_terminated(solver_scope)
            || self
                .phase_termination
                .is_some_and(|t| t.is_phase_terminated(solver_scope, phase_scope))
    }
}

/// A termination that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTermination;

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for NeverTermination {
    fn is_solver_terminated(&self, _solver_scope: &SolverScope<S, D>) -> bool {
        false
    }

    fn is_phase_terminated(&self, _solver_scope: &SolverScope<S, D>, _phase_scope: &PhaseScope<S>) -> bool {
        false
    }
}

//! Best score based terminations.

use localforge_core::{PlanningSolution, Score};
use localforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Terminates when the best score reaches or exceeds a target.
#[derive(Debug, Clone)]
pub struct BestScoreTermination<Sc: Score> {
    target_score: Sc,
}

impl<Sc: Score> BestScoreTermination<Sc> {
    pub fn new(target_score: Sc) -> Self {
        Self { target_score }
    }
}

impl<S, D> Termination<S, D> for BestScoreTermination<S::Score>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope
            .best_score()
            .is_some_and(|best| *best >= self.target_score)
    }

    fn is_phase_terminated(&self, _solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        phase_scope.best_score() >= self.target_score
    }
}

/// Terminates as soon as the best solution is feasible.
#[derive(Debug, Clone, Default)]
pub struct BestScoreFeasibleTermination;

impl BestScoreFeasibleTermination {
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for BestScoreFeasibleTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        solver_scope.best_score().is_some_and(|best| best.is_feasible())
    }

    fn is_phase_terminated(&self, _solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        phase_scope.best_score().is_feasible()
    }
}

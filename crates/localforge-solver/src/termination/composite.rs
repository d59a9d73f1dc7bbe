//! Composite termination conditions (AND/OR).

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Terminates when ANY child terminates.
///
/// # Examples
///
/// ```
/// use localforge_solver::termination::{OrTermination, StepCountTermination, TimeTermination};
/// use localforge_test::nqueens::{NQueensDirector, NQueensSolution};
///
/// // Terminate after 30 seconds OR 1000 steps
/// let termination: OrTermination<NQueensSolution, NQueensDirector> = OrTermination::new(vec![
///     Box::new(TimeTermination::seconds(30)),
///     Box::new(StepCountTermination::new(1000)),
/// ]);
/// ```
pub struct OrTermination<S: PlanningSolution, D: ScoreDirector<S>> {
    terminations: Vec<Box<dyn Termination<S, D>>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> std::fmt::Debug for OrTermination<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OrTermination").field(&self.terminations).finish()
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> OrTermination<S, D> {
    pub fn new(terminations: Vec<Box<dyn Termination<S, D>>>) -> Self {
        Self { terminations }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for OrTermination<S, D> {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        self.terminations
            .iter()
            .any(|t| t.is_solver_terminated(solver_scope))
    }

    fn is_phase_terminated(&self, solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        self.terminations
            .iter()
            .any(|t| t.is_phase_terminated(solver_scope, phase_scope))
    }
}

/// Terminates when ALL children terminate.
///
/// An empty `AndTermination` never terminates.
pub struct AndTermination<S: PlanningSolution, D: ScoreDirector<S>> {
    terminations: Vec<Box<dyn Termination<S, D>>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> std::fmt::Debug for AndTermination<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AndTermination").field(&self.terminations).finish()
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> AndTermination<S, D> {
    pub fn new(terminations: Vec<Box<dyn Termination<S, D>>>) -> Self {
        Self { terminations }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for AndTermination<S, D> {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        !self.terminations.is_empty()
            && self
                .terminations
                .iter()
                .all(|t| t.is_solver_terminated(solver_scope))
    }

    fn is_phase_terminated(&self, solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        !self.terminations.is_empty()
            && self
                .terminations
                .iter()
                .all(|t| t.is_phase_terminated(solver_scope, phase_scope))
    }
}

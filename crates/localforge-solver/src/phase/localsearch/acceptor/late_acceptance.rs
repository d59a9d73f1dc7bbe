//! Late acceptance acceptor.

use std::fmt::Debug;

use localforge_core::PlanningSolution;

use super::Acceptor;
use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, PhaseScope, StepScope};

/// Default number of remembered step scores.
pub const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;

/// Compares each move with the step score from `size` steps ago.
///
/// The window starts filled with the phase best score. A move is accepted
/// if it is at least as good as the late score, or, with hill climbing
/// enabled (the default), at least as good as the last step score.
///
/// # Example
///
/// ```
/// use localforge_solver::phase::localsearch::LateAcceptanceAcceptor;
/// use localforge_test::nqueens::NQueensSolution;
///
/// let acceptor = LateAcceptanceAcceptor::<NQueensSolution>::new(400);
/// assert_eq!(acceptor.late_acceptance_size(), 400);
/// ```
pub struct LateAcceptanceAcceptor<S: PlanningSolution> {
    late_acceptance_size: usize,
    hill_climbing_enabled: bool,
    previous_scores: Vec<S::Score>,
    late_score_index: usize,
}

impl<S: PlanningSolution> Debug for LateAcceptanceAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LateAcceptanceAcceptor")
            .field("late_acceptance_size", &self.late_acceptance_size)
            .field("hill_climbing_enabled", &self.hill_climbing_enabled)
            .field("late_score_index", &self.late_score_index)
            .finish()
    }
}

impl<S: PlanningSolution> LateAcceptanceAcceptor<S> {
    pub fn new(late_acceptance_size: usize) -> Self {
        Self {
            late_acceptance_size,
            hill_climbing_enabled: true,
            previous_scores: Vec::new(),
            late_score_index: 0,
        }
    }

    pub fn with_hill_climbing(mut self, hill_climbing_enabled: bool) -> Self {
        self.hill_climbing_enabled = hill_climbing_enabled;
        self
    }

    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
    }
}

impl<S: PlanningSolution> Default for LateAcceptanceAcceptor<S> {
    fn default() -> Self {
        Self::new(DEFAULT_LATE_ACCEPTANCE_SIZE)
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for LateAcceptanceAcceptor<S> {
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        self.previous_scores = vec![phase_scope.best_score(); self.late_acceptance_size];
        self.late_score_index = 0;
    }

    fn is_accepted(&mut self, move_scope: &MoveScope<S, M>, step_scope: &StepScope<S, M>) -> bool {
        let move_score = move_scope.score();
        let Some(late_score) = self.previous_scores.get(self.late_score_index) else {
            return true;
        };
        if move_score >= *late_score {
            return true;
        }
        self.hill_climbing_enabled && move_score >= step_scope.last_step_score()
    }

    fn step_ended(&mut self, step_scope: &StepScope<S, M>) {
        let Some(step_score) = step_scope.score() else {
            return;
        };
        if let Some(slot) = self.previous_scores.get_mut(self.late_score_index) {
            *slot = step_score;
            self.late_score_index = (self.late_score_index + 1) % self.late_acceptance_size;
        }
    }

    fn phase_ended(&mut self, _phase_scope: &PhaseScope<S>) {
        self.previous_scores.clear();
        self.late_score_index = 0;
    }
}

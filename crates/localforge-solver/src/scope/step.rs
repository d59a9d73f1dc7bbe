//! Step-level scope.

use localforge_core::PlanningSolution;

/// Scope for a single step within a phase.
///
/// Created before the decider runs; the decider fills in the picked step
/// and the phase fills in the undo step after applying it.
pub struct StepScope<S: PlanningSolution, M> {
    step_index: u64,
    last_step_score: S::Score,
    best_score: S::Score,
    step: Option<M>,
    undo_step: Option<M>,
    score: Option<S::Score>,
    picked_move_index: Option<u64>,
    selected_move_count: u64,
    accepted_move_count: u64,
}

impl<S: PlanningSolution, M> StepScope<S, M> {
    /// Creates a step scope.
    ///
    /// # Arguments
    /// * `step_index` - Index of this step within the phase (0-based)
    /// * `last_step_score` - Score of the last completed step
    /// * `best_score` - Best score of the phase when the step started
    pub fn new(step_index: u64, last_step_score: S::Score, best_score: S::Score) -> Self {
        Self {
            step_index,
            last_step_score,
            best_score,
            step: None,
            undo_step: None,
            score: None,
            picked_move_index: None,
            selected_move_count: 0,
            accepted_move_count: 0,
        }
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    pub fn last_step_score(&self) -> S::Score {
        self.last_step_score
    }

    pub fn best_score(&self) -> S::Score {
        self.best_score
    }

    pub fn step(&self) -> Option<&M> {
        self.step.as_ref()
    }

    pub fn undo_step(&self) -> Option<&M> {
        self.undo_step.as_ref()
    }

    /// The score the step leads to.
    pub fn score(&self) -> Option<S::Score> {
        self.score
    }

    /// Index of the picked move in the order the moves were selected.
    pub fn picked_move_index(&self) -> Option<u64> {
        self.picked_move_index
    }

    /// Sets the picked move and the score it leads to.
    pub fn set_step(&mut self, step: M, score: S::Score, move_index: u64) {
        self.step = Some(step);
        self.score = Some(score);
        self.picked_move_index = Some(move_index);
    }

    pub fn set_undo_step(&mut self, undo_step: M) {
        self.undo_step = Some(undo_step);
    }

    pub fn selected_move_count(&self) -> u64 {
        self.selected_move_count
    }

    pub fn increment_selected_move_count(&mut self) {
        self.selected_move_count += 1;
    }

    pub fn accepted_move_count(&self) -> u64 {
        self.accepted_move_count
    }

    pub fn increment_accepted_move_count(&mut self) {
        self.accepted_move_count += 1;
    }
}

//! Move-level scope.

use localforge_core::PlanningSolution;

/// A move that has been evaluated during a step.
///
/// `move_index` is the position of the move in the order it was selected.
/// It is the ordering key when evaluations complete out of order.
pub struct MoveScope<S: PlanningSolution, M> {
    step_index: u64,
    move_index: u64,
    mv: M,
    score: S::Score,
    accepted: bool,
}

impl<S: PlanningSolution, M> MoveScope<S, M> {
    pub fn new(step_index: u64, move_index: u64, mv: M, score: S::Score) -> Self {
        Self {
            step_index,
            move_index,
            mv,
            score,
            accepted: false,
        }
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    pub fn move_index(&self) -> u64 {
        self.move_index
    }

    pub fn get_move(&self) -> &M {
        &self.mv
    }

    pub fn into_move(self) -> M {
        self.mv
    }

    pub fn score(&self) -> S::Score {
        self.score
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn set_accepted(&mut self, accepted: bool) {
        self.accepted = accepted;
    }
}

impl<S: PlanningSolution, M: std::fmt::Debug> std::fmt::Debug for MoveScope<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveScope")
            .field("step_index", &self.step_index)
            .field("move_index", &self.move_index)
            .field("move", &self.mv)
            .field("score", &self.score)
            .field("accepted", &self.accepted)
            .finish()
    }
}

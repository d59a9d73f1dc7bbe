//! Fixed list move selector.

use std::fmt::Debug;

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;

use super::MoveSelector;

/// Yields the same fixed list of moves in every step.
#[derive(Debug, Clone)]
pub struct ListMoveSelector<M> {
    moves: Vec<M>,
    cursor: usize,
}

impl<M> ListMoveSelector<M> {
    pub fn new(moves: Vec<M>) -> Self {
        Self { moves, cursor: 0 }
    }
}

impl<S, M> MoveSelector<S, M> for ListMoveSelector<M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn step_started<D: ScoreDirector<S>>(&mut self, _score_director: &D) {
        self.cursor = 0;
    }

    fn next_move<D: ScoreDirector<S>>(&mut self, _score_director: &D) -> Option<M> {
        let m = self.moves.get(self.cursor).cloned();
        self.cursor += 1;
        m
    }

    fn size<D: ScoreDirector<S>>(&self, _score_director: &D) -> usize {
        self.moves.len()
    }

    fn is_never_ending(&self) -> bool {
        false
    }
}

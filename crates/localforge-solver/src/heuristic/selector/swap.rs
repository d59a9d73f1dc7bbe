//! Swap move selector.

use std::fmt::Debug;
use std::hash::Hash;

use localforge_config::SelectionOrder;
use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::heuristic::r#move::SwapMove;
use crate::scope::{PhaseScope, ProblemScale};

use super::{MoveSelector, VariableAccessor};

/// Generates a [`SwapMove`] for every pair of entities.
///
/// `Original` order yields each unordered pair once as `(left, right)` with
/// `left < right`. `Random` order never ends and samples two distinct
/// entities.
pub struct SwapMoveSelector<S, V> {
    accessor: VariableAccessor<S, V>,
    selection_order: SelectionOrder,
    rng: StdRng,
    left_cursor: usize,
    right_cursor: usize,
}

impl<S, V> Debug for SwapMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapMoveSelector")
            .field("accessor", &self.accessor)
            .field("selection_order", &self.selection_order)
            .finish()
    }
}

impl<S, V: Hash> SwapMoveSelector<S, V> {
    pub fn new(accessor: VariableAccessor<S, V>, selection_order: SelectionOrder) -> Self {
        Self {
            accessor,
            selection_order,
            rng: StdRng::seed_from_u64(0),
            left_cursor: 0,
            right_cursor: 1,
        }
    }

    fn create_move(&self, solution: &S, left: usize, right: usize) -> SwapMove<S, V> {
        SwapMove::new(
            solution,
            left,
            right,
            self.accessor.getter(),
            self.accessor.setter(),
            self.accessor.variable_name(),
            self.accessor.descriptor_index(),
        )
    }
}

impl<S, V> MoveSelector<S, SwapMove<S, V>> for SwapMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Hash + Send + Sync + Debug + 'static,
{
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        self.rng = phase_scope.fork_random();
    }

    fn step_started<D: ScoreDirector<S>>(&mut self, _score_director: &D) {
        self.left_cursor = 0;
        self.right_cursor = 1;
    }

    fn next_move<D: ScoreDirector<S>>(&mut self, score_director: &D) -> Option<SwapMove<S, V>> {
        let solution = score_director.working_solution();
        let entity_count = self.accessor.entity_count(solution);
        if entity_count < 2 {
            return None;
        }

        match self.selection_order {
            SelectionOrder::Original => {
                if self.right_cursor >= entity_count {
                    self.left_cursor += 1;
                    self.right_cursor = self.left_cursor + 1;
                }
                if self.right_cursor >= entity_count {
                    return None;
                }
                let (left, right) = (self.left_cursor, self.right_cursor);
                self.right_cursor += 1;
                Some(self.create_move(solution, left, right))
            }
            SelectionOrder::Random => {
                let left = self.rng.random_range(0..entity_count);
                // Skip `left` by drawing from the remaining entities.
                let mut right = self.rng.random_range(0..entity_count - 1);
                if right >= left {
                    right += 1;
                }
                Some(self.create_move(solution, left, right))
            }
        }
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        let n = self.accessor.entity_count(score_director.working_solution());
        n * n.saturating_sub(1) / 2
    }

    fn problem_scale<D: ScoreDirector<S>>(&self, score_director: &D) -> ProblemScale {
        self.accessor.problem_scale(score_director.working_solution())
    }

    fn is_never_ending(&self) -> bool {
        self.selection_order == SelectionOrder::Random
    }
}

//! Change move selector.

use std::fmt::Debug;
use std::hash::Hash;

use localforge_config::SelectionOrder;
use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::heuristic::r#move::ChangeMove;
use crate::scope::{PhaseScope, ProblemScale};

use super::{MoveSelector, VariableAccessor};

/// Generates a [`ChangeMove`] for every (entity, value) pair.
///
/// In `Original` order the moves of a step are entities in index order,
/// each with every value of the value range. In `Random` order the selector
/// never ends and samples an entity and a value uniformly.
pub struct ChangeMoveSelector<S, V> {
    accessor: VariableAccessor<S, V>,
    selection_order: SelectionOrder,
    rng: StdRng,
    entity_cursor: usize,
    value_cursor: usize,
}

impl<S, V> Debug for ChangeMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMoveSelector")
            .field("accessor", &self.accessor)
            .field("selection_order", &self.selection_order)
            .finish()
    }
}

impl<S, V> ChangeMoveSelector<S, V> {
    pub fn new(accessor: VariableAccessor<S, V>, selection_order: SelectionOrder) -> Self {
        Self {
            accessor,
            selection_order,
            rng: StdRng::seed_from_u64(0),
            entity_cursor: 0,
            value_cursor: 0,
        }
    }

    fn create_move(&self, entity_index: usize, value: V) -> ChangeMove<S, V> {
        ChangeMove::new(
            entity_index,
            Some(value),
            self.accessor.getter(),
            self.accessor.setter(),
            self.accessor.variable_name(),
            self.accessor.descriptor_index(),
        )
    }
}

impl<S, V> MoveSelector<S, ChangeMove<S, V>> for ChangeMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        self.rng = phase_scope.fork_random();
    }

    fn step_started<D: ScoreDirector<S>>(&mut self, _score_director: &D) {
        self.entity_cursor = 0;
        self.value_cursor = 0;
    }

    fn next_move<D: ScoreDirector<S>>(&mut self, score_director: &D) -> Option<ChangeMove<S, V>> {
        let solution = score_director.working_solution();
        let entity_count = self.accessor.entity_count(solution);
        let values = self.accessor.value_range(solution);
        if entity_count == 0 || values.is_empty() {
            return None;
        }

        match self.selection_order {
            SelectionOrder::Original => {
                if self.value_cursor >= values.len() {
                    self.entity_cursor += 1;
                    self.value_cursor = 0;
                }
                if self.entity_cursor >= entity_count {
                    return None;
                }
                let value = values[self.value_cursor].clone();
                self.value_cursor += 1;
                Some(self.create_move(self.entity_cursor, value))
            }
            SelectionOrder::Random => {
                let entity_index = self.rng.random_range(0..entity_count);
                let value = values[self.rng.random_range(0..values.len())].clone();
                Some(self.create_move(entity_index, value))
            }
        }
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        let solution = score_director.working_solution();
        self.accessor.entity_count(solution) * self.accessor.value_range(solution).len()
    }

    fn problem_scale<D: ScoreDirector<S>>(&self, score_director: &D) -> ProblemScale {
        self.accessor.problem_scale(score_director.working_solution())
    }

    fn is_never_ending(&self) -> bool {
        self.selection_order == SelectionOrder::Random
    }
}

//! SwapMove - exchanges the values of two entities.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;
use smallvec::{smallvec, SmallVec};

use super::traits::value_key;
use super::Move;

/// A move that swaps one variable between two entities.
///
/// The value keys reported by `planning_values` are captured when the move
/// is created, so value tabu sees the values the swap was selected for.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `V` - The variable value type
pub struct SwapMove<S, V> {
    left_entity_index: usize,
    right_entity_index: usize,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
    descriptor_index: usize,
    value_keys: [u64; 2],
}

impl<S, V> Clone for SwapMove<S, V> {
    fn clone(&self) -> Self {
        Self {
            left_entity_index: self.left_entity_index,
            right_entity_index: self.right_entity_index,
            getter: self.getter,
            setter: self.setter,
            variable_name: self.variable_name,
            descriptor_index: self.descriptor_index,
            value_keys: self.value_keys,
        }
    }
}

impl<S, V> Debug for SwapMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapMove")
            .field("left_entity_index", &self.left_entity_index)
            .field("right_entity_index", &self.right_entity_index)
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V> PartialEq for SwapMove<S, V> {
    fn eq(&self, other: &Self) -> bool {
        self.left_entity_index == other.left_entity_index
            && self.right_entity_index == other.right_entity_index
            && self.descriptor_index == other.descriptor_index
    }
}

impl<S, V> Eq for SwapMove<S, V> {}

impl<S, V> Hash for SwapMove<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.left_entity_index.hash(state);
        self.right_entity_index.hash(state);
        self.descriptor_index.hash(state);
    }
}

impl<S, V: Hash> SwapMove<S, V> {
    /// Creates a swap between two entities of `solution`.
    pub fn new(
        solution: &S,
        left_entity_index: usize,
        right_entity_index: usize,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
        descriptor_index: usize,
    ) -> Self {
        let value_keys = [
            value_key(&getter(solution, left_entity_index)),
            value_key(&getter(solution, right_entity_index)),
        ];
        Self {
            left_entity_index,
            right_entity_index,
            getter,
            setter,
            variable_name,
            descriptor_index,
            value_keys,
        }
    }
}

impl<S, V> SwapMove<S, V> {
    pub fn left_entity_index(&self) -> usize {
        self.left_entity_index
    }

    pub fn right_entity_index(&self) -> usize {
        self.right_entity_index
    }
}

impl<S, V> Move<S> for SwapMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Hash + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        if self.left_entity_index == self.right_entity_index {
            return false;
        }
        let solution = score_director.working_solution();
        (self.getter)(solution, self.left_entity_index)
            != (self.getter)(solution, self.right_entity_index)
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        let solution = score_director.working_solution();
        // After the swap the right entity holds the left value and vice versa.
        Self {
            value_keys: [
                value_key(&(self.getter)(solution, self.right_entity_index)),
                value_key(&(self.getter)(solution, self.left_entity_index)),
            ],
            ..self.clone()
        }
    }

    fn apply<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let left_value = (self.getter)(score_director.working_solution(), self.left_entity_index);
        let right_value =
            (self.getter)(score_director.working_solution(), self.right_entity_index);

        for (entity_index, value) in [
            (self.left_entity_index, right_value),
            (self.right_entity_index, left_value),
        ] {
            score_director.before_variable_changed(
                self.descriptor_index,
                entity_index,
                self.variable_name,
            );
            (self.setter)(score_director.working_solution_mut(), entity_index, value);
            score_director.after_variable_changed(
                self.descriptor_index,
                entity_index,
                self.variable_name,
            );
        }
    }

    fn planning_entities(&self) -> SmallVec<[usize; 2]> {
        smallvec![self.left_entity_index, self.right_entity_index]
    }

    fn planning_values(&self) -> SmallVec<[u64; 2]> {
        SmallVec::from_buf(self.value_keys)
    }
}

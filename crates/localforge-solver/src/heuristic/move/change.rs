//! ChangeMove - assigns a value to a planning variable.
//!
//! This move stores typed function pointers that operate directly on
//! the solution. No `Arc<dyn>`, no `Box<dyn Any>`, no `downcast_ref`.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;
use smallvec::{smallvec, SmallVec};

use super::traits::value_key;
use super::Move;

/// A move that assigns a value to an entity's variable.
///
/// Equality and hashing only look at the entity, the descriptor and the
/// target value, so two moves created by different selectors compare equal
/// when they do the same thing.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `V` - The variable value type
pub struct ChangeMove<S, V> {
    entity_index: usize,
    to_value: Option<V>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
    descriptor_index: usize,
}

impl<S, V: Clone> Clone for ChangeMove<S, V> {
    fn clone(&self) -> Self {
        Self {
            entity_index: self.entity_index,
            to_value: self.to_value.clone(),
            getter: self.getter,
            setter: self.setter,
            variable_name: self.variable_name,
            descriptor_index: self.descriptor_index,
        }
    }
}

impl<S, V: Debug> Debug for ChangeMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMove")
            .field("entity_index", &self.entity_index)
            .field("variable_name", &self.variable_name)
            .field("to_value", &self.to_value)
            .finish()
    }
}

impl<S, V: PartialEq> PartialEq for ChangeMove<S, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entity_index == other.entity_index
            && self.descriptor_index == other.descriptor_index
            && self.to_value == other.to_value
    }
}

impl<S, V: Eq> Eq for ChangeMove<S, V> {}

impl<S, V: Hash> Hash for ChangeMove<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity_index.hash(state);
        self.descriptor_index.hash(state);
        self.to_value.hash(state);
    }
}

impl<S, V> ChangeMove<S, V> {
    /// Creates a new change move with typed function pointers.
    ///
    /// # Arguments
    /// * `entity_index` - Index of the entity in its collection
    /// * `to_value` - The value to assign (None to unassign)
    /// * `getter` - Function pointer to get current value from solution
    /// * `setter` - Function pointer to set value on solution
    /// * `variable_name` - Name of the variable (for debugging)
    /// * `descriptor_index` - Index of the entity descriptor
    pub fn new(
        entity_index: usize,
        to_value: Option<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
        descriptor_index: usize,
    ) -> Self {
        Self {
            entity_index,
            to_value,
            getter,
            setter,
            variable_name,
            descriptor_index,
        }
    }

    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    pub fn to_value(&self) -> Option<&V> {
        self.to_value.as_ref()
    }
}

impl<S, V> Move<S> for ChangeMove<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let current = (self.getter)(score_director.working_solution(), self.entity_index);
        current != self.to_value
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        let old_value = (self.getter)(score_director.working_solution(), self.entity_index);
        Self {
            to_value: old_value,
            ..self.clone()
        }
    }

    fn apply<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        score_director.before_variable_changed(
            self.descriptor_index,
            self.entity_index,
            self.variable_name,
        );
        (self.setter)(
            score_director.working_solution_mut(),
            self.entity_index,
            self.to_value.clone(),
        );
        score_director.after_variable_changed(
            self.descriptor_index,
            self.entity_index,
            self.variable_name,
        );
    }

    fn planning_entities(&self) -> SmallVec<[usize; 2]> {
        smallvec![self.entity_index]
    }

    fn planning_values(&self) -> SmallVec<[u64; 2]> {
        smallvec![value_key(&self.to_value)]
    }
}

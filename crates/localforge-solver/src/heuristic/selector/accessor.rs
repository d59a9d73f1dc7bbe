//! Typed access to one planning variable.

use crate::scope::ProblemScale;

/// Function pointers that read and write one planning variable.
///
/// Selectors build moves from an accessor without knowing anything else
/// about the solution type. No `Arc<dyn>`, no downcasting.
///
/// # Example
///
/// ```
/// use localforge_solver::heuristic::selector::VariableAccessor;
///
/// struct Plan { slots: Vec<Option<u32>>, values: Vec<u32> }
///
/// fn get_slot(p: &Plan, i: usize) -> Option<u32> { p.slots[i] }
/// fn set_slot(p: &mut Plan, i: usize, v: Option<u32>) { p.slots[i] = v; }
/// fn slot_count(p: &Plan) -> usize { p.slots.len() }
/// fn slot_values(p: &Plan) -> &[u32] { &p.values }
///
/// let accessor = VariableAccessor::new(0, "slot", get_slot, set_slot, slot_count, slot_values);
/// let plan = Plan { slots: vec![None, Some(2)], values: vec![1, 2, 3] };
/// assert_eq!(accessor.entity_count(&plan), 2);
/// assert_eq!(accessor.value_range(&plan), &[1, 2, 3]);
/// ```
pub struct VariableAccessor<S, V> {
    descriptor_index: usize,
    variable_name: &'static str,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    entity_count: fn(&S) -> usize,
    value_range: fn(&S) -> &[V],
}

impl<S, V> Clone for VariableAccessor<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for VariableAccessor<S, V> {}

impl<S, V> std::fmt::Debug for VariableAccessor<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableAccessor")
            .field("descriptor_index", &self.descriptor_index)
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V> VariableAccessor<S, V> {
    pub fn new(
        descriptor_index: usize,
        variable_name: &'static str,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        entity_count: fn(&S) -> usize,
        value_range: fn(&S) -> &[V],
    ) -> Self {
        Self {
            descriptor_index,
            variable_name,
            getter,
            setter,
            entity_count,
            value_range,
        }
    }

    pub fn descriptor_index(&self) -> usize {
        self.descriptor_index
    }

    pub fn variable_name(&self) -> &'static str {
        self.variable_name
    }

    pub fn getter(&self) -> fn(&S, usize) -> Option<V> {
        self.getter
    }

    pub fn setter(&self) -> fn(&mut S, usize, Option<V>) {
        self.setter
    }

    pub fn entity_count(&self, solution: &S) -> usize {
        (self.entity_count)(solution)
    }

    pub fn value_range<'a>(&self, solution: &'a S) -> &'a [V] {
        (self.value_range)(solution)
    }

    pub fn problem_scale(&self, solution: &S) -> ProblemScale {
        ProblemScale::new(self.entity_count(solution), self.value_range(solution).len())
    }
}

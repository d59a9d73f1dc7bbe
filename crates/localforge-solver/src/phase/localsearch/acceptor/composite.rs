//! Composite acceptor.

use std::fmt::Debug;

use localforge_core::PlanningSolution;

use super::Acceptor;
use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, PhaseScope, StepScope};

/// Accepts a move only if every child acceptor accepts it.
///
/// Every child sees every lifecycle event and is asked about every move.
pub struct CompositeAcceptor<S: PlanningSolution, M: Move<S>> {
    acceptors: Vec<Box<dyn Acceptor<S, M>>>,
}

impl<S: PlanningSolution, M: Move<S>> Debug for CompositeAcceptor<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CompositeAcceptor").field(&self.acceptors).finish()
    }
}

impl<S: PlanningSolution, M: Move<S>> CompositeAcceptor<S, M> {
    pub fn new(acceptors: Vec<Box<dyn Acceptor<S, M>>>) -> Self {
        Self { acceptors }
    }

    pub fn len(&self) -> usize {
        self.acceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acceptors.is_empty()
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for CompositeAcceptor<S, M> {
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        for acceptor in &mut self.acceptors {
            acceptor.phase_started(phase_scope);
        }
    }

    fn step_started(&mut self, step_scope: &StepScope<S, M>) {
        for acceptor in &mut self.acceptors {
            acceptor.step_started(step_scope);
        }
    }

    fn is_accepted(&mut self, move_scope: &MoveScope<S, M>, step_scope: &StepScope<S, M>) -> bool {
        self.acceptors
            .iter_mut()
            .fold(true, |all, acceptor| acceptor.is_accepted(move_scope, step_scope) && all)
    }

    fn step_ended(&mut self, step_scope: &StepScope<S, M>) {
        for acceptor in &mut self.acceptors {
            acceptor.step_ended(step_scope);
        }
    }

    fn phase_ended(&mut self, phase_scope: &PhaseScope<S>) {
        for acceptor in &mut self.acceptors {
            acceptor.phase_ended(phase_scope);
        }
    }
}

//! Hill climbing acceptor.

use localforge_core::PlanningSolution;

use super::Acceptor;
use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, StepScope};

/// Accepts moves that do not worsen the last step score.
///
/// Equal moves are accepted so the search can walk across plateaus.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for HillClimbingAcceptor {
    fn is_accepted(&mut self, move_scope: &MoveScope<S, M>, step_scope: &StepScope<S, M>) -> bool {
        move_scope.score() >= step_scope.last_step_score()
    }
}

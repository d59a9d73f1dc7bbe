//! Step counting hill climbing acceptor.

use std::fmt::Debug;

use localforge_config::StepCountingHillClimbingType;
use localforge_core::PlanningSolution;

use super::Acceptor;
use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, PhaseScope, StepScope};

/// Default number of counted units between threshold updates.
pub const DEFAULT_STEP_COUNTING_HILL_CLIMBING_SIZE: usize = 400;

/// Hill climbing against a threshold that is refreshed every `size` units.
///
/// The threshold starts at the phase best score. A move is accepted if it
/// does not worsen the last step score or reaches the threshold. What a
/// unit is depends on the [`StepCountingHillClimbingType`].
pub struct StepCountingHillClimbingAcceptor<S: PlanningSolution> {
    step_counting_hill_climbing_size: u64,
    step_counting_hill_climbing_type: StepCountingHillClimbingType,
    threshold_score: Option<S::Score>,
    count: u64,
}

impl<S: PlanningSolution> Debug for StepCountingHillClimbingAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepCountingHillClimbingAcceptor")
            .field("size", &self.step_counting_hill_climbing_size)
            .field("type", &self.step_counting_hill_climbing_type)
            .field("threshold_score", &self.threshold_score)
            .field("count", &self.count)
            .finish()
    }
}

impl<S: PlanningSolution> StepCountingHillClimbingAcceptor<S> {
    pub fn new(size: usize, counting_type: StepCountingHillClimbingType) -> Self {
        Self {
            step_counting_hill_climbing_size: size as u64,
            step_counting_hill_climbing_type: counting_type,
            threshold_score: None,
            count: 0,
        }
    }

    fn determine_count_increment<M>(&self, step_scope: &StepScope<S, M>) -> u64 {
        let step_score = step_scope.score();
        let last_step_score = step_scope.last_step_score();
        match self.step_counting_hill_climbing_type {
            StepCountingHillClimbingType::SelectedMove => step_scope.selected_move_count(),
            StepCountingHillClimbingType::AcceptedMove => step_scope.accepted_move_count(),
            StepCountingHillClimbingType::Step => 1,
            StepCountingHillClimbingType::EqualOrImprovingStep => {
                u64::from(step_score.is_some_and(|s| s >= last_step_score))
            }
            StepCountingHillClimbingType::ImprovingStep => {
                u64::from(step_score.is_some_and(|s| s > last_step_score))
            }
        }
    }
}

impl<S: PlanningSolution> Default for StepCountingHillClimbingAcceptor<S> {
    fn default() -> Self {
        Self::new(
            DEFAULT_STEP_COUNTING_HILL_CLIMBING_SIZE,
            StepCountingHillClimbingType::default(),
        )
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for StepCountingHillClimbingAcceptor<S> {
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        self.threshold_score = Some(phase_scope.best_score());
        self.count = 0;
    }

    fn is_accepted(&mut self, move_scope: &MoveScope<S, M>, step_scope: &StepScope<S, M>) -> bool {
        let move_score = move_scope.score();
        if move_score >= step_scope.last_step_score() {
            return true;
        }
        self.threshold_score
            .is_some_and(|threshold| move_score >= threshold)
    }

    fn step_ended(&mut self, step_scope: &StepScope<S, M>) {
        self.count += self.determine_count_increment(step_scope);
        if self.count >= self.step_counting_hill_climbing_size {
            if let Some(step_score) = step_scope.score() {
                self.threshold_score = Some(step_score);
            }
            self.count = 0;
        }
    }

    fn phase_ended(&mut self, _phase_scope: &PhaseScope<S>) {
        self.threshold_score = None;
        self.count = 0;
    }
}

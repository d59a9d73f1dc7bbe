//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether an evaluated move may become the next step.
//! Most compare the move score with the last step score; the tabu
//! acceptors look at what the move touches instead.

mod composite;
mod great_deluge;
mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;
mod step_counting;
mod tabu;

use std::fmt::Debug;

use localforge_core::PlanningSolution;

use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, PhaseScope, StepScope};

pub use composite::CompositeAcceptor;
pub use great_deluge::{GreatDelugeAcceptor, WaterLevelIncrement, DEFAULT_WATER_LEVEL_INCREMENT_RATIO};
pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::{LateAcceptanceAcceptor, DEFAULT_LATE_ACCEPTANCE_SIZE};
pub use simulated_annealing::{SimulatedAnnealingAcceptor, DEFAULT_DECAY_RATE};
pub use step_counting::{StepCountingHillClimbingAcceptor, DEFAULT_STEP_COUNTING_HILL_CLIMBING_SIZE};
pub use tabu::{TabuAcceptor, TabuKey, TabuKind, TabuSize};

/// Trait for accepting or rejecting moves in local search.
///
/// Object safe: a phase holds its acceptor as `Box<dyn Acceptor<S, M>>`.
/// Lifecycle callbacks are driven by the decider in the order
/// `phase_started`, then per step `step_started`, `is_accepted` for every
/// evaluated move and `step_ended`, then `phase_ended`.
pub trait Acceptor<S: PlanningSolution, M: Move<S>>: Send + Debug {
    /// Called when a phase starts.
    fn phase_started(&mut self, _phase_scope: &mut PhaseScope<S>) {}

    /// Called when a step starts.
    fn step_started(&mut self, _step_scope: &StepScope<S, M>) {}

    /// Returns true if the evaluated move may be picked as the step.
    fn is_accepted(&mut self, move_scope: &MoveScope<S, M>, step_scope: &StepScope<S, M>) -> bool;

    /// Called after the step has been applied.
    fn step_ended(&mut self, _step_scope: &StepScope<S, M>) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self, _phase_scope: &PhaseScope<S>) {}
}

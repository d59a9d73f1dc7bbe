//! Simulated annealing acceptor.

use std::fmt::Debug;

use localforge_core::{PlanningSolution, Score};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Acceptor;
use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, PhaseScope, StepScope};

/// Default temperature multiplier per step.
pub const DEFAULT_DECAY_RATE: f64 = 0.99;

const TEMPERATURE_MINIMUM: f64 = 1.0e-100;

/// Accepts worsening moves with a chance that shrinks as the search cools.
///
/// The starting temperature is a score: every score level has its own
/// temperature. Moves that do not worsen the last step score are always
/// accepted. A worsening move is accepted with chance
/// `prod exp(-diff_i / T_i)` over the levels it worsens, where `diff_i` is
/// how much level `i` got worse. All temperatures are multiplied by the
/// decay rate after every step.
///
/// # Example
///
/// ```
/// use localforge_core::SimpleScore;
/// use localforge_solver::phase::localsearch::SimulatedAnnealingAcceptor;
/// use localforge_test::nqueens::NQueensSolution;
///
/// let acceptor = SimulatedAnnealingAcceptor::<NQueensSolution>::new(SimpleScore::of(10), 0.99);
/// ```
pub struct SimulatedAnnealingAcceptor<S: PlanningSolution> {
    starting_temperature: S::Score,
    decay_rate: f64,
    temperature_levels: Vec<f64>,
    rng: StdRng,
}

impl<S: PlanningSolution> Debug for SimulatedAnnealingAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedAnnealingAcceptor")
            .field("starting_temperature", &self.starting_temperature)
            .field("decay_rate", &self.decay_rate)
            .field("temperature_levels", &self.temperature_levels)
            .finish()
    }
}

impl<S: PlanningSolution> SimulatedAnnealingAcceptor<S> {
    /// Creates a new simulated annealing acceptor.
    ///
    /// # Arguments
    /// * `starting_temperature` - Temperature per score level, none negative
    /// * `decay_rate` - Multiplicative decay per step (e.g., 0.99)
    pub fn new(starting_temperature: S::Score, decay_rate: f64) -> Self {
        Self {
            starting_temperature,
            decay_rate,
            temperature_levels: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Current temperature per score level.
    pub fn temperature_levels(&self) -> &[f64] {
        &self.temperature_levels
    }

    fn accept_chance(&self, move_score: S::Score, last_step_score: S::Score) -> f64 {
        let difference = (last_step_score - move_score).to_level_numbers();
        difference
            .iter()
            .zip(&self.temperature_levels)
            .filter(|(diff, _)| **diff > 0)
            .map(|(diff, temperature)| (-(*diff as f64) / temperature).exp())
            .product()
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for SimulatedAnnealingAcceptor<S> {
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        self.temperature_levels = self
            .starting_temperature
            .to_level_numbers()
            .into_iter()
            .map(|level| (level as f64).max(TEMPERATURE_MINIMUM))
            .collect();
        self.rng = phase_scope.fork_random();
    }

    fn is_accepted(&mut self, move_scope: &MoveScope<S, M>, step_scope: &StepScope<S, M>) -> bool {
        let move_score = move_scope.score();
        let last_step_score = step_scope.last_step_score();
        if move_score >= last_step_score {
            return true;
        }
        let accept_chance = self.accept_chance(move_score, last_step_score);
        self.rng.random_range(0.0..1.0) < accept_chance
    }

    fn step_ended(&mut self, _step_scope: &StepScope<S, M>) {
        for temperature in &mut self.temperature_levels {
            *temperature = (*temperature * self.decay_rate).max(TEMPERATURE_MINIMUM);
        }
    }

    fn phase_ended(&mut self, _phase_scope: &PhaseScope<S>) {
        self.temperature_levels.clear();
    }
}

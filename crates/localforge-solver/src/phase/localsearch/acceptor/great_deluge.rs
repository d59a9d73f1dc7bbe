//! Great deluge acceptor.

use std::fmt::Debug;

use localforge_core::{PlanningSolution, Score};

use super::Acceptor;
use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, PhaseScope, StepScope};

/// Default water level increment as a ratio of the starting score.
pub const DEFAULT_WATER_LEVEL_INCREMENT_RATIO: f64 = 0.000_000_05;

/// How the water level rises after every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaterLevelIncrement<Sc> {
    /// A fixed score added per step.
    Score(Sc),
    /// A ratio of the absolute starting level added per step.
    Ratio(f64),
}

/// Accepts moves above a rising water level.
///
/// The level starts at the phase best score. A move is accepted if it
/// reaches the level or improves on the last step score.
pub struct GreatDelugeAcceptor<S: PlanningSolution> {
    increment: WaterLevelIncrement<S::Score>,
    starting_water_level: Option<S::Score>,
    current_water_level: Option<S::Score>,
    current_water_level_ratio: f64,
}

impl<S: PlanningSolution> Debug for GreatDelugeAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreatDelugeAcceptor")
            .field("increment", &self.increment)
            .field("current_water_level", &self.current_water_level)
            .finish()
    }
}

impl<S: PlanningSolution> GreatDelugeAcceptor<S> {
    pub fn new(increment: WaterLevelIncrement<S::Score>) -> Self {
        Self {
            increment,
            starting_water_level: None,
            current_water_level: None,
            current_water_level_ratio: 0.0,
        }
    }

    pub fn current_water_level(&self) -> Option<S::Score> {
        self.current_water_level
    }
}

impl<S: PlanningSolution> Default for GreatDelugeAcceptor<S> {
    fn default() -> Self {
        Self::new(WaterLevelIncrement::Ratio(DEFAULT_WATER_LEVEL_INCREMENT_RATIO))
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for GreatDelugeAcceptor<S> {
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        let starting_level = phase_scope.best_score();
        self.starting_water_level = Some(starting_level);
        self.current_water_level = Some(starting_level);
        self.current_water_level_ratio = 0.0;
    }

    fn is_accepted(&mut self, move_scope: &MoveScope<S, M>, step_scope: &StepScope<S, M>) -> bool {
        let move_score = move_scope.score();
        if self.current_water_level.is_some_and(|level| move_score >= level) {
            return true;
        }
        move_score > step_scope.last_step_score()
    }

    fn step_ended(&mut self, _step_scope: &StepScope<S, M>) {
        let (Some(starting), Some(current)) = (self.starting_water_level, self.current_water_level)
        else {
            return;
        };
        self.current_water_level = Some(match self.increment {
            WaterLevelIncrement::Score(increment) => current + increment,
            WaterLevelIncrement::Ratio(ratio) => {
                self.current_water_level_ratio += ratio;
                starting + starting.abs().multiply(self.current_water_level_ratio)
            }
        });
    }

    fn phase_ended(&mut self, _phase_scope: &PhaseScope<S>) {
        self.starting_water_level = None;
        self.current_water_level = None;
        self.current_water_level_ratio = 0.0;
    }
}

//! Move selector trait.

use std::fmt::Debug;

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::scope::{PhaseScope, ProblemScale};

/// A pull-based source of moves.
///
/// The decider calls `next_move` until it returns `None`, the forager quits
/// or the phase terminates. Lifecycle hooks are driven by the phase.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `M` - The move type
pub trait MoveSelector<S: PlanningSolution, M: Move<S>>: Send + Debug {
    fn solving_started(&mut self) {}

    /// Called when a phase starts; random selectors fork their random here.
    fn phase_started(&mut self, _phase_scope: &mut PhaseScope<S>) {}

    /// Called before the first `next_move` of a step.
    fn step_started<D: ScoreDirector<S>>(&mut self, _score_director: &D) {}

    /// Returns the next move of the current step.
    fn next_move<D: ScoreDirector<S>>(&mut self, score_director: &D) -> Option<M>;

    /// Returns the number of distinct moves for the current working solution.
    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize;

    /// Entity and value counts of the variables this selector changes.
    fn problem_scale<D: ScoreDirector<S>>(&self, _score_director: &D) -> ProblemScale {
        ProblemScale::default()
    }

    /// Returns true if `next_move` never runs out of moves.
    fn is_never_ending(&self) -> bool;

    fn step_ended(&mut self) {}

    fn phase_ended(&mut self) {}

    fn solving_ended(&mut self) {}
}

//! Move selector built from configuration.

use std::fmt::Debug;
use std::hash::Hash;

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;

use crate::heuristic::r#move::EitherMove;
use crate::scope::{PhaseScope, ProblemScale};

use super::{ChangeMoveSelector, MoveSelector, SwapMoveSelector, UnionMoveSelector};

/// A change, swap or union selector that yields [`EitherMove`].
///
/// This is the selector type a configured phase runs with, so any
/// combination of the configurable selectors has one concrete type.
pub enum EitherMoveSelector<S, V> {
    Change(ChangeMoveSelector<S, V>),
    Swap(SwapMoveSelector<S, V>),
    Union(UnionMoveSelector<S, EitherMove<S, V>, EitherMoveSelector<S, V>>),
}

impl<S, V> Debug for EitherMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EitherMoveSelector::Change(s) => s.fmt(f),
            EitherMoveSelector::Swap(s) => s.fmt(f),
            EitherMoveSelector::Union(s) => s.fmt(f),
        }
    }
}

impl<S, V> MoveSelector<S, EitherMove<S, V>> for EitherMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn solving_started(&mut self) {
        match self {
            EitherMoveSelector::Change(s) => s.solving_started(),
            EitherMoveSelector::Swap(s) => s.solving_started(),
            EitherMoveSelector::Union(s) => s.solving_started(),
        }
    }

    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        match self {
            EitherMoveSelector::Change(s) => s.phase_started(phase_scope),
            EitherMoveSelector::Swap(s) => s.phase_started(phase_scope),
            EitherMoveSelector::Union(s) => s.phase_started(phase_scope),
        }
    }

    fn step_started<D: ScoreDirector<S>>(&mut self, score_director: &D) {
        match self {
            EitherMoveSelector::Change(s) => s.step_started(score_director),
            EitherMoveSelector::Swap(s) => s.step_started(score_director),
            EitherMoveSelector::Union(s) => s.step_started(score_director),
        }
    }

    fn next_move<D: ScoreDirector<S>>(&mut self, score_director: &D) -> Option<EitherMove<S, V>> {
        match self {
            EitherMoveSelector::Change(s) => s.next_move(score_director).map(EitherMove::Change),
            EitherMoveSelector::Swap(s) => s.next_move(score_director).map(EitherMove::Swap),
            EitherMoveSelector::Union(s) => s.next_move(score_director),
        }
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        match self {
            EitherMoveSelector::Change(s) => s.size(score_director),
            EitherMoveSelector::Swap(s) => s.size(score_director),
            EitherMoveSelector::Union(s) => s.size(score_director),
        }
    }

    fn problem_scale<D: ScoreDirector<S>>(&self, score_director: &D) -> ProblemScale {
        match self {
            EitherMoveSelector::Change(s) => s.problem_scale(score_director),
            EitherMoveSelector::Swap(s) => s.problem_scale(score_director),
            EitherMoveSelector::Union(s) => s.problem_scale(score_director),
        }
    }

    fn is_never_ending(&self) -> bool {
        match self {
            EitherMoveSelector::Change(s) => s.is_never_ending(),
            EitherMoveSelector::Swap(s) => s.is_never_ending(),
            EitherMoveSelector::Union(s) => s.is_never_ending(),
        }
    }

    fn step_ended(&mut self) {
        match self {
            EitherMoveSelector::Change(s) => s.step_ended(),
            EitherMoveSelector::Swap(s) => s.step_ended(),
            EitherMoveSelector::Union(s) => s.step_ended(),
        }
    }

    fn phase_ended(&mut self) {
        match self {
            EitherMoveSelector::Change(s) => s.phase_ended(),
            EitherMoveSelector::Swap(s) => s.phase_ended(),
            EitherMoveSelector::Union(s) => s.phase_ended(),
        }
    }

    fn solving_ended(&mut self) {
        match self {
            EitherMoveSelector::Change(s) => s.solving_ended(),
            EitherMoveSelector::Swap(s) => s.solving_ended(),
            EitherMoveSelector::Union(s) => s.solving_ended(),
        }
    }
}

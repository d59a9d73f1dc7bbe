//! EitherMove - a change move or a swap move over the same variable.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;
use smallvec::SmallVec;

use super::{ChangeMove, Move, SwapMove};

/// The move type of a union of change and swap selectors.
///
/// Keeps both neighborhoods monomorphized: no boxing, and the move is
/// still `Clone + Eq + Hash` for tabu.
pub enum EitherMove<S, V> {
    Change(ChangeMove<S, V>),
    Swap(SwapMove<S, V>),
}

impl<S, V: Clone> Clone for EitherMove<S, V> {
    fn clone(&self) -> Self {
        match self {
            EitherMove::Change(m) => EitherMove::Change(m.clone()),
            EitherMove::Swap(m) => EitherMove::Swap(m.clone()),
        }
    }
}

impl<S, V: Debug> Debug for EitherMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EitherMove::Change(m) => m.fmt(f),
            EitherMove::Swap(m) => m.fmt(f),
        }
    }
}

impl<S, V: PartialEq> PartialEq for EitherMove<S, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EitherMove::Change(a), EitherMove::Change(b)) => a == b,
            (EitherMove::Swap(a), EitherMove::Swap(b)) => a == b,
            _ => false,
        }
    }
}

impl<S, V: Eq> Eq for EitherMove<S, V> {}

impl<S, V: Hash> Hash for EitherMove<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            EitherMove::Change(m) => {
                0u8.hash(state);
                m.hash(state);
            }
            EitherMove::Swap(m) => {
                1u8.hash(state);
                m.hash(state);
            }
        }
    }
}

impl<S, V> From<ChangeMove<S, V>> for EitherMove<S, V> {
    fn from(m: ChangeMove<S, V>) -> Self {
        EitherMove::Change(m)
    }
}

impl<S, V> From<SwapMove<S, V>> for EitherMove<S, V> {
    fn from(m: SwapMove<S, V>) -> Self {
        EitherMove::Swap(m)
    }
}

impl<S, V> Move<S> for EitherMove<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        match self {
            EitherMove::Change(m) => m.is_doable(score_director),
            EitherMove::Swap(m) => m.is_doable(score_director),
        }
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        match self {
            EitherMove::Change(m) => EitherMove::Change(m.create_undo_move(score_director)),
            EitherMove::Swap(m) => EitherMove::Swap(m.create_undo_move(score_director)),
        }
    }

    fn apply<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        match self {
            EitherMove::Change(m) => m.apply(score_director),
            EitherMove::Swap(m) => m.apply(score_director),
        }
    }

    fn planning_entities(&self) -> SmallVec<[usize; 2]> {
        match self {
            EitherMove::Change(m) => m.planning_entities(),
            EitherMove::Swap(m) => m.planning_entities(),
        }
    }

    fn planning_values(&self) -> SmallVec<[u64; 2]> {
        match self {
            EitherMove::Change(m) => m.planning_values(),
            EitherMove::Swap(m) => m.planning_values(),
        }
    }
}

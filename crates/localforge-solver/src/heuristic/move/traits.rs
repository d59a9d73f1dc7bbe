//! Move trait definition.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;
use smallvec::SmallVec;

/// A reversible change to one or more planning variables.
///
/// Moves are plain values: they are cloned into the forager, sent to move
/// threads and compared for tabu bookkeeping. A move and its undo move are
/// both ordinary moves of the same type.
///
/// # Type Parameters
/// * `S` - The planning solution type
///
/// # Implementation Notes
/// - `create_undo_move` must be called before `apply`, it reads the state
///   the undo move has to restore
/// - Every variable change in `apply` must be wrapped in
///   `before_variable_changed` / `after_variable_changed`
/// - Methods are generic over `D` so moves work with any director
pub trait Move<S: PlanningSolution>:
    Clone + Debug + PartialEq + Eq + std::hash::Hash + Send + Sync + 'static
{
    /// Returns true if this move changes the working solution.
    ///
    /// A move is not doable if it would leave every variable unchanged.
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool;

    /// Creates the move that restores the current state after `apply`.
    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self;

    /// Changes the working solution.
    fn apply<D: ScoreDirector<S>>(&self, score_director: &mut D);

    /// Creates the undo move, then applies this move.
    ///
    /// Returns the undo move.
    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) -> Self {
        let undo_move = self.create_undo_move(score_director);
        self.apply(score_director);
        undo_move
    }

    /// Returns the entity indices this move changes.
    fn planning_entities(&self) -> SmallVec<[usize; 2]>;

    /// Returns stable keys of the values this move assigns.
    fn planning_values(&self) -> SmallVec<[u64; 2]>;
}

/// Stable key of a planning value, used by value tabu.
pub fn value_key<V: Hash>(value: &V) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

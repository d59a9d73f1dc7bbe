//! Planning solution trait.

use crate::score::Score;

/// The working solution under optimization.
///
/// Exactly one working solution exists per solving thread. Moves mutate it
/// in place through a score director; the solver only clones it to recall
/// the best solution or to seed a move thread replica.
///
/// # Example
///
/// ```
/// use localforge_core::{PlanningSolution, SimpleScore};
///
/// #[derive(Clone)]
/// struct Schedule {
///     slots: Vec<Option<u32>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Schedule {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
/// ```
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the current score of this solution, if calculated.
    fn score(&self) -> Option<Self::Score>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Self::Score>);

    /// Returns true if every planning variable has a value.
    fn is_initialized(&self) -> bool {
        true
    }
}

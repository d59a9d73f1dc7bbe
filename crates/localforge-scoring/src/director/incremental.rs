//! Incremental score director.

use localforge_core::PlanningSolution;
use tracing::trace;

use super::traits::ScoreDirector;

/// Calculates a score incrementally from variable change notifications.
///
/// `reset_working_solution` must rebuild all internal state from the given
/// solution. The before/after callbacks receive the solution as it is at
/// that moment: before the change for `before_variable_changed`, after it
/// for `after_variable_changed`.
pub trait IncrementalScoreCalculator<S: PlanningSolution>: Clone + Send {
    /// Rebuilds the calculator state from scratch.
    fn reset_working_solution(&mut self, solution: &S);

    /// Retracts the contribution of the entity about to change.
    fn before_variable_changed(&mut self, solution: &S, entity_index: usize);

    /// Inserts the contribution of the entity that just changed.
    fn after_variable_changed(&mut self, solution: &S, entity_index: usize);

    /// Returns the score for the current state.
    fn calculate_score(&self) -> S::Score;
}

/// A score director backed by an [`IncrementalScoreCalculator`].
pub struct IncrementalScoreDirector<S: PlanningSolution, C> {
    working_solution: S,
    calculator: C,
    needs_reset: bool,
    calculation_count: u64,
}

impl<S, C> IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
{
    /// Creates a director; the calculator is reset on the first score calculation.
    pub fn new(solution: S, calculator: C) -> Self {
        IncrementalScoreDirector {
            working_solution: solution,
            calculator,
            needs_reset: true,
            calculation_count: 0,
        }
    }

    fn ensure_reset(&mut self) {
        if self.needs_reset {
            trace!("Resetting incremental score calculator");
            self.calculator.reset_working_solution(&self.working_solution);
            self.needs_reset = false;
        }
    }
}

impl<S, C> ScoreDirector<S> for IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.working_solution
    }

    fn set_working_solution(&mut self, solution: S) {
        self.working_solution = solution;
        self.needs_reset = true;
    }

    fn calculate_score(&mut self) -> S::Score {
        self.ensure_reset();
        let score = self.calculator.calculate_score();
        self.working_solution.set_score(Some(score));
        self.calculation_count += 1;
        score
    }

    fn calculate_score_from_scratch(&self) -> S::Score {
        let mut fresh = self.calculator.clone();
        fresh.reset_working_solution(&self.working_solution);
        fresh.calculate_score()
    }

    fn before_variable_changed(
        &mut self,
        _descriptor_index: usize,
        entity_index: usize,
        _variable_name: &str,
    ) {
        self.ensure_reset();
        self.calculator
            .before_variable_changed(&self.working_solution, entity_index);
    }

    fn after_variable_changed(
        &mut self,
        _descriptor_index: usize,
        entity_index: usize,
        _variable_name: &str,
    ) {
        self.calculator
            .after_variable_changed(&self.working_solution, entity_index);
    }

    fn calculation_count(&self) -> u64 {
        self.calculation_count
    }

    fn create_child_thread(&self) -> Self {
        IncrementalScoreDirector {
            working_solution: self.working_solution.clone(),
            calculator: self.calculator.clone(),
            needs_reset: true,
            calculation_count: 0,
        }
    }
}

//! Simple score director with full recalculation.

use localforge_core::PlanningSolution;

use super::traits::ScoreDirector;

/// A score director that recalculates the full score after each change.
///
/// The calculator is stored as a concrete generic type parameter, not as
/// `Arc<dyn Fn>`. It must be `Clone` so move evaluation threads can carry
/// their own copy.
#[derive(Clone)]
pub struct SimpleScoreDirector<S: PlanningSolution, C> {
    working_solution: S,
    score_calculator: C,
    score_dirty: bool,
    cached_score: Option<S::Score>,
    calculation_count: u64,
}

impl<S, C> SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Clone + Send + Sync,
{
    /// Creates a new SimpleScoreDirector.
    pub fn new(solution: S, score_calculator: C) -> Self {
        SimpleScoreDirector {
            working_solution: solution,
            score_calculator,
            score_dirty: true,
            cached_score: None,
            calculation_count: 0,
        }
    }

    fn mark_dirty(&mut self) {
        self.score_dirty = true;
    }
}

impl<S, C> ScoreDirector<S> for SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Clone + Send + Sync,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.mark_dirty();
        &mut self.working_solution
    }

    fn set_working_solution(&mut self, solution: S) {
        self.working_solution = solution;
        self.cached_score = None;
        self.mark_dirty();
    }

    fn calculate_score(&mut self) -> S::Score {
        if !self.score_dirty {
            if let Some(score) = self.cached_score {
                return score;
            }
        }

        let score = (self.score_calculator)(&self.working_solution);
        self.working_solution.set_score(Some(score));
        self.cached_score = Some(score);
        self.score_dirty = false;
        self.calculation_count += 1;
        score
    }

    fn calculate_score_from_scratch(&self) -> S::Score {
        (self.score_calculator)(&self.working_solution)
    }

    fn before_variable_changed(
        &mut self,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
        self.mark_dirty();
    }

    fn after_variable_changed(
        &mut self,
        _descriptor_index: usize,
        _entity_index: usize,
        _variable_name: &str,
    ) {
        // Already marked dirty in before_variable_changed
    }

    fn calculation_count(&self) -> u64 {
        self.calculation_count
    }

    fn create_child_thread(&self) -> Self {
        SimpleScoreDirector {
            working_solution: self.working_solution.clone(),
            score_calculator: self.score_calculator.clone(),
            score_dirty: true,
            cached_score: None,
            calculation_count: 0,
        }
    }
}

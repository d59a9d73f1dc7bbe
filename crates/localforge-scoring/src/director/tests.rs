//! Tests for the score directors.

use localforge_core::{PlanningSolution, SimpleScore};

use super::*;
use crate::assertion::{assert_expected_undo_score, assert_working_score_from_scratch};

#[derive(Clone, Debug)]
struct TestSolution {
    values: Vec<Option<i32>>,
    score: Option<SimpleScore>,
}

impl PlanningSolution for TestSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

fn solution(values: &[Option<i32>]) -> TestSolution {
    TestSolution {
        values: values.to_vec(),
        score: None,
    }
}

fn count_unassigned(s: &TestSolution) -> SimpleScore {
    SimpleScore::of(-(s.values.iter().filter(|v| v.is_none()).count() as i64))
}

// Penalizes unassigned values; when `skip_insert` is set it forgets to add
// back the contribution of a changed entity.
#[derive(Clone, Debug, Default)]
struct UnassignedCalculator {
    penalty: i64,
    skip_insert: bool,
}

impl IncrementalScoreCalculator<TestSolution> for UnassignedCalculator {
    fn reset_working_solution(&mut self, solution: &TestSolution) {
        self.penalty = solution.values.iter().filter(|v| v.is_none()).count() as i64;
    }

    fn before_variable_changed(&mut self, solution: &TestSolution, entity_index: usize) {
        if solution.values[entity_index].is_none() {
            self.penalty -= 1;
        }
    }

    fn after_variable_changed(&mut self, solution: &TestSolution, entity_index: usize) {
        if !self.skip_insert && solution.values[entity_index].is_none() {
            self.penalty += 1;
        }
    }

    fn calculate_score(&self) -> SimpleScore {
        SimpleScore::of(-self.penalty)
    }
}

fn set_value<D: ScoreDirector<TestSolution>>(director: &mut D, index: usize, value: Option<i32>) {
    director.before_variable_changed(0, index, "value");
    director.working_solution_mut().values[index] = value;
    director.after_variable_changed(0, index, "value");
}

#[test]
fn test_simple_director_caches_until_change() {
    let mut director = SimpleScoreDirector::new(solution(&[Some(1), None, None]), count_unassigned);

    assert_eq!(director.calculate_score(), SimpleScore::of(-2));
    assert_eq!(director.calculate_score(), SimpleScore::of(-2));
    assert_eq!(director.calculation_count(), 1);

    set_value(&mut director, 1, Some(4));
    assert_eq!(director.calculate_score(), SimpleScore::of(-1));
    assert_eq!(director.calculation_count(), 2);
    assert_eq!(director.working_solution().score, Some(SimpleScore::of(-1)));
}

#[test]
fn test_incremental_director_tracks_changes() {
    let mut director = IncrementalScoreDirector::new(
        solution(&[None, None, Some(3)]),
        UnassignedCalculator::default(),
    );

    assert_eq!(director.calculate_score(), SimpleScore::of(-2));
    set_value(&mut director, 0, Some(1));
    assert_eq!(director.calculate_score(), SimpleScore::of(-1));
    set_value(&mut director, 2, None);
    assert_eq!(director.calculate_score(), SimpleScore::of(-2));
    assert_eq!(director.calculate_score_from_scratch(), SimpleScore::of(-2));
}

#[test]
fn test_child_thread_is_independent() {
    let mut parent = IncrementalScoreDirector::new(
        solution(&[None, Some(2)]),
        UnassignedCalculator::default(),
    );
    parent.calculate_score();

    let mut child = parent.create_child_thread();
    set_value(&mut child, 0, Some(7));

    assert_eq!(child.calculate_score(), SimpleScore::of(0));
    assert_eq!(parent.calculate_score(), SimpleScore::of(-1));
    assert_eq!(parent.working_solution().values[0], None);
    assert_eq!(child.calculation_count(), 1);
}

#[test]
fn test_set_working_solution_resets_state() {
    let mut director = IncrementalScoreDirector::new(
        solution(&[None]),
        UnassignedCalculator::default(),
    );
    assert_eq!(director.calculate_score(), SimpleScore::of(-1));

    director.set_working_solution(solution(&[Some(1), Some(2)]));
    assert_eq!(director.calculate_score(), SimpleScore::of(0));
}

#[test]
fn test_from_scratch_assertion_detects_corruption() {
    let calculator = UnassignedCalculator {
        penalty: 0,
        skip_insert: true,
    };
    let mut director = IncrementalScoreDirector::new(solution(&[Some(1), Some(2)]), calculator);
    director.calculate_score();

    set_value(&mut director, 0, None);
    let working_score = director.calculate_score();
    assert_eq!(working_score, SimpleScore::of(0));

    let err = assert_working_score_from_scratch(&director, working_score, &"unassign 0")
        .unwrap_err();
    assert!(err.is_corruption());
    let message = err.to_string();
    assert!(message.contains("(0)"));
    assert!(message.contains("(-1)"));
    assert!(message.contains("unassign 0"));
}

#[test]
fn test_undo_assertion() {
    let director = SimpleScoreDirector::new(solution(&[Some(1)]), count_unassigned);

    assert!(assert_expected_undo_score(
        &director,
        SimpleScore::of(-3),
        SimpleScore::of(-3),
        &"undo"
    )
    .is_ok());
    let err = assert_expected_undo_score(&director, SimpleScore::of(-3), SimpleScore::of(-2), &"undo")
        .unwrap_err();
    assert!(err.to_string().contains("undo move corruption"));
}

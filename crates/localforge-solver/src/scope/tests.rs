//! Tests for the scope hierarchy.

use super::*;
use localforge_core::{PlanningSolution, SimpleScore};
use localforge_scoring::ScoreDirector;
use localforge_test::nqueens::{create_nqueens_director, set_queen_row, NQueensSolution};
use rand::{Rng, SeedableRng};

#[test]
fn test_solver_scope_best_solution() {
    let mut scope = SolverScope::with_seed(create_nqueens_director(&[0, 0, 0, 0]), 0);
    scope.start_solving();
    assert!(scope.best_solution().is_none());

    assert!(scope.update_best_solution());
    assert_eq!(scope.best_score(), Some(&SimpleScore::of(-6)));
    assert!(!scope.update_best_solution());

    let director = scope.score_director_mut();
    director.before_variable_changed(0, 1, "row");
    set_queen_row(director.working_solution_mut(), 1, Some(2));
    director.after_variable_changed(0, 1, "row");
    scope.increment_step_count();
    assert_eq!(scope.unimproved_step_count(), 1);

    assert!(scope.update_best_solution());
    assert_eq!(scope.unimproved_step_count(), 0);
    let best = scope.best_solution().unwrap();
    assert_eq!(best.score(), Some(SimpleScore::of(-4)));
    assert_eq!(best.queens[1].row, Some(2));
}

#[test]
fn test_take_best_or_working_solution() {
    let scope = SolverScope::with_seed(create_nqueens_director(&[1, 3, 0, 2]), 0);
    let solution: NQueensSolution = scope.take_best_or_working_solution();
    assert_eq!(solution.score(), Some(SimpleScore::of(0)));
}

#[test]
fn test_terminate_early_flag() {
    let scope = SolverScope::with_seed(create_nqueens_director(&[0, 0]), 0);
    assert!(!scope.is_terminate_early());
    scope.terminate_early();
    assert!(scope.is_terminate_early());
}

#[test]
fn test_forked_randoms_are_reproducible() {
    let mut a = SolverScope::with_seed(create_nqueens_director(&[0, 0]), 42);
    let mut b = SolverScope::with_seed(create_nqueens_director(&[0, 0]), 42);
    let x: u64 = a.fork_random().random();
    let y: u64 = b.fork_random().random();
    assert_eq!(x, y);
}

#[test]
fn test_phase_scope_step_tracking() {
    let rng = rand::rngs::StdRng::seed_from_u64(0);
    let mut phase_scope: PhaseScope<NQueensSolution> =
        PhaseScope::new(0, SimpleScore::of(-10), SimpleScore::of(-8), rng);

    assert_eq!(phase_scope.next_step_index(), 0);
    assert_eq!(phase_scope.last_completed_step_index(), None);
    assert_eq!(phase_scope.last_completed_step_score(), SimpleScore::of(-10));

    assert!(!phase_scope.step_ended(0, SimpleScore::of(-9)));
    assert_eq!(phase_scope.unimproved_step_count(), 1);

    assert!(phase_scope.step_ended(1, SimpleScore::of(-5)));
    assert_eq!(phase_scope.best_score(), SimpleScore::of(-5));
    assert_eq!(phase_scope.best_step_index(), Some(1));
    assert_eq!(phase_scope.unimproved_step_count(), 0);

    phase_scope.step_ended(2, SimpleScore::of(-7));
    assert_eq!(phase_scope.next_step_index(), 3);
    assert_eq!(phase_scope.last_completed_step_index(), Some(2));
    assert_eq!(phase_scope.unimproved_step_count(), 1);
}

#[test]
fn test_step_scope() {
    let mut step_scope: StepScope<NQueensSolution, u32> =
        StepScope::new(3, SimpleScore::of(-4), SimpleScore::of(-2));
    assert!(step_scope.step().is_none());
    step_scope.increment_selected_move_count();
    step_scope.increment_selected_move_count();
    step_scope.increment_accepted_move_count();
    step_scope.set_step(7, SimpleScore::of(-3), 1);

    assert_eq!(step_scope.step(), Some(&7));
    assert_eq!(step_scope.score(), Some(SimpleScore::of(-3)));
    assert_eq!(step_scope.picked_move_index(), Some(1));
    assert_eq!(step_scope.selected_move_count(), 2);
    assert_eq!(step_scope.accepted_move_count(), 1);
}

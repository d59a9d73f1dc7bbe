//! Tests for the local search phase with the single-threaded decider.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::*;
use crate::heuristic::r#move::ChangeMove;
use crate::heuristic::selector::{ChangeMoveSelector, ListMoveSelector, SelectionOrder, VariableAccessor};
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::{NeverTermination, StepCountTermination};
use localforge_config::{EnvironmentMode, PickEarlyType};
use localforge_core::{LocalForgeError, PlanningSolution};
use localforge_scoring::IncrementalScoreDirector;
use localforge_test::nqueens::{
    calculate_conflicts, create_nqueens_director, get_queen_row, queen_count, row_range, set_queen_row,
    NQueensDirector, NQueensIncrementalCalculator, NQueensSolution,
};

type QueenChange = ChangeMove<NQueensSolution, i64>;

fn accessor() -> VariableAccessor<NQueensSolution, i64> {
    VariableAccessor::new(0, "row", get_queen_row, set_queen_row, queen_count, row_range)
}

fn hill_climbing(
    order: SelectionOrder,
    accepted_count_limit: Option<usize>,
) -> LocalSearchDecider<NQueensSolution, QueenChange, ChangeMoveSelector<NQueensSolution, i64>> {
    LocalSearchDecider::new(
        ChangeMoveSelector::new(accessor(), order),
        Box::new(HillClimbingAcceptor::new()),
        Box::new(AcceptedForager::new(PickEarlyType::Never, accepted_count_limit, true)),
    )
}

#[test]
fn test_hill_climbing_improves_nqueens() {
    let mut solver_scope = SolverScope::with_seed(create_nqueens_director(&[0, 0, 0, 0, 0, 0]), 7);
    solver_scope.start_solving();
    let starting_score = solver_scope.calculate_score();

    let mut phase = LocalSearchPhase::new(0, hill_climbing(SelectionOrder::Original, None));
    phase.solve(&mut solver_scope, &StepCountTermination::new(20)).unwrap();

    assert_eq!(solver_scope.total_step_count(), 20);
    let best_score = *solver_scope.best_score().unwrap();
    assert!(best_score > starting_score);

    let solution = solver_scope.take_best_or_working_solution();
    assert_eq!(solution.score(), Some(calculate_conflicts(&solution)));
    assert_eq!(solution.score(), Some(best_score));
}

#[test]
fn test_random_selection_with_limit_is_reproducible() {
    let run = |seed| {
        let mut solver_scope = SolverScope::with_seed(create_nqueens_director(&[0, 0, 0, 0, 0, 0, 0, 0]), seed);
        solver_scope.start_solving();
        let mut phase = LocalSearchPhase::new(0, hill_climbing(SelectionOrder::Random, Some(3)));
        phase.solve(&mut solver_scope, &StepCountTermination::new(40)).unwrap();
        solver_scope
            .take_best_or_working_solution()
            .queens
            .iter()
            .map(|q| q.row)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn test_phase_termination_applies_to_phase_only() {
    let mut solver_scope = SolverScope::with_seed(create_nqueens_director(&[0, 0, 0, 0]), 0);
    solver_scope.start_solving();
    let mut phase = LocalSearchPhase::new(0, hill_climbing(SelectionOrder::Original, None))
        .with_termination(Box::new(StepCountTermination::new(3)));
    phase.solve(&mut solver_scope, &NeverTermination).unwrap();
    assert_eq!(solver_scope.total_step_count(), 3);
}

#[test]
fn test_phase_ends_when_no_move_is_doable() {
    let mut solver_scope = SolverScope::with_seed(create_nqueens_director(&[0, 1, 2, 3]), 0);
    solver_scope.start_solving();
    let unchanged: QueenChange = ChangeMove::new(0, Some(0), get_queen_row, set_queen_row, "row", 0);
    let decider = LocalSearchDecider::new(
        ListMoveSelector::new(vec![unchanged]),
        Box::new(HillClimbingAcceptor::new()),
        Box::new(AcceptedForager::new(PickEarlyType::Never, None, true)),
    );
    let mut phase = LocalSearchPhase::new(0, decider);
    phase.solve(&mut solver_scope, &NeverTermination).unwrap();
    assert_eq!(solver_scope.total_step_count(), 0);
    assert!(solver_scope.best_score().is_none());
}

#[test]
fn test_never_ending_selector_needs_bounded_forager() {
    let mut solver_scope = SolverScope::with_seed(create_nqueens_director(&[0, 0, 0, 0]), 0);
    solver_scope.start_solving();
    let mut phase = LocalSearchPhase::new(0, hill_climbing(SelectionOrder::Random, None));
    let err = phase.solve(&mut solver_scope, &StepCountTermination::new(5)).unwrap_err();
    match err {
        LocalForgeError::Config(message) => assert!(message.contains("never ending")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(solver_scope.total_step_count(), 0);
}

#[test]
fn test_terminate_early_flag_stops_phase() {
    let flag = Arc::new(AtomicBool::new(true));
    let mut solver_scope: SolverScope<NQueensSolution, NQueensDirector> =
        SolverScope::with_seed(create_nqueens_director(&[0, 0, 0, 0]), 0).with_terminate_early_flag(flag);
    solver_scope.start_solving();
    let mut phase = LocalSearchPhase::new(0, hill_climbing(SelectionOrder::Original, None));
    phase.solve(&mut solver_scope, &NeverTermination).unwrap();
    assert_eq!(solver_scope.total_step_count(), 0);
}

fn corrupted_scope(mode: EnvironmentMode) -> SolverScope<NQueensSolution, IncrementalScoreDirector<NQueensSolution, NQueensIncrementalCalculator>> {
    let director = IncrementalScoreDirector::new(
        NQueensSolution::with_rows(&[0, 0, 0, 0]),
        NQueensIncrementalCalculator::corrupted(),
    );
    let mut solver_scope = SolverScope::with_seed(director, 0).with_environment_mode(mode);
    solver_scope.start_solving();
    solver_scope
}

#[test]
fn test_full_assert_detects_corruption() {
    let mut solver_scope = corrupted_scope(EnvironmentMode::FullAssert);
    let mut phase = LocalSearchPhase::new(0, hill_climbing(SelectionOrder::Original, None));
    let err = phase.solve(&mut solver_scope, &StepCountTermination::new(5)).unwrap_err();
    assert!(err.is_corruption(), "unexpected error: {err:?}");
}

#[test]
fn test_fast_assert_detects_corrupted_undo() {
    let mut solver_scope = corrupted_scope(EnvironmentMode::FastAssert);
    let mut phase = LocalSearchPhase::new(0, hill_climbing(SelectionOrder::Original, None));
    let err = phase.solve(&mut solver_scope, &StepCountTermination::new(5)).unwrap_err();
    assert!(err.is_corruption(), "unexpected error: {err:?}");
}

#[test]
fn test_corruption_goes_unnoticed_without_assertions() {
    let mut solver_scope = corrupted_scope(EnvironmentMode::Reproducible);
    let mut phase = LocalSearchPhase::new(0, hill_climbing(SelectionOrder::Original, None));
    assert!(phase.solve(&mut solver_scope, &StepCountTermination::new(2)).is_ok());
}

//! Tests for the move types.

use super::*;
use localforge_core::SimpleScore;
use localforge_scoring::ScoreDirector;
use localforge_test::nqueens::{
    create_incremental_nqueens_director, create_nqueens_director, get_queen_row, set_queen_row,
    NQueensSolution,
};

type QueenChange = ChangeMove<NQueensSolution, i64>;
type QueenSwap = SwapMove<NQueensSolution, i64>;

fn change(entity_index: usize, row: i64) -> QueenChange {
    ChangeMove::new(entity_index, Some(row), get_queen_row, set_queen_row, "row", 0)
}

fn swap(solution: &NQueensSolution, left: usize, right: usize) -> QueenSwap {
    SwapMove::new(solution, left, right, get_queen_row, set_queen_row, "row", 0)
}

fn rows(director: &impl ScoreDirector<NQueensSolution>) -> Vec<Option<i64>> {
    director
        .working_solution()
        .queens
        .iter()
        .map(|q| q.row)
        .collect()
}

#[test]
fn test_change_move_is_doable() {
    let director = create_nqueens_director(&[0, 1, 2, 3]);
    assert!(!change(0, 0).is_doable(&director));
    assert!(change(0, 1).is_doable(&director));
}

#[test]
fn test_change_move_undo_restores_state() {
    let mut director = create_nqueens_director(&[0, 1, 2, 3]);
    let before_rows = rows(&director);
    let before_score = director.calculate_score();

    let undo = change(1, 3).do_move(&mut director);
    assert_eq!(get_queen_row(director.working_solution(), 1), Some(3));
    assert_ne!(director.calculate_score(), before_score);

    undo.do_move(&mut director);
    assert_eq!(rows(&director), before_rows);
    assert_eq!(director.calculate_score(), before_score);
}

#[test]
fn test_undo_is_idempotent_with_incremental_director() {
    let mut director = create_incremental_nqueens_director(&[0, 0, 0, 0]);
    let before_score = director.calculate_score();

    for entity_index in 0..4 {
        for row in 0..4 {
            let m = change(entity_index, row);
            if !m.is_doable(&director) {
                continue;
            }
            let undo = m.do_move(&mut director);
            director.calculate_score();
            undo.apply(&mut director);
            assert_eq!(director.calculate_score(), before_score);
            assert_eq!(director.calculate_score_from_scratch(), before_score);
        }
    }
}

#[test]
fn test_swap_move() {
    let mut director = create_nqueens_director(&[0, 2, 1, 3]);
    let before_score = director.calculate_score();
    let m = swap(director.working_solution(), 1, 2);
    assert!(m.is_doable(&director));

    let undo = m.do_move(&mut director);
    assert_eq!(rows(&director), vec![Some(0), Some(1), Some(2), Some(3)]);
    assert_eq!(director.calculate_score(), SimpleScore::of(-6));

    undo.do_move(&mut director);
    assert_eq!(rows(&director), vec![Some(0), Some(2), Some(1), Some(3)]);
    assert_eq!(director.calculate_score(), before_score);
}

#[test]
fn test_swap_move_with_equal_values_is_not_doable() {
    let director = create_nqueens_director(&[1, 1, 2, 3]);
    assert!(!swap(director.working_solution(), 0, 1).is_doable(&director));
    assert!(!swap(director.working_solution(), 2, 2).is_doable(&director));
}

#[test]
fn test_planning_entities_and_values() {
    let director = create_nqueens_director(&[0, 2, 1, 3]);
    let m = change(2, 3);
    assert_eq!(m.planning_entities().as_slice(), &[2]);
    assert_eq!(m.planning_values().as_slice(), &[value_key(&Some(3i64))]);

    let s = swap(director.working_solution(), 0, 3);
    assert_eq!(s.planning_entities().as_slice(), &[0, 3]);
    assert_eq!(
        s.planning_values().as_slice(),
        &[value_key(&Some(0i64)), value_key(&Some(3i64))]
    );
}

#[test]
fn test_move_identity() {
    let director = create_nqueens_director(&[0, 2, 1, 3]);
    assert_eq!(change(1, 2), change(1, 2));
    assert_ne!(change(1, 2), change(1, 3));

    let undo = change(1, 3).create_undo_move(&director);
    assert_eq!(undo, change(1, 2));

    let either_change: EitherMove<_, _> = change(1, 2).into();
    let either_swap: EitherMove<_, _> = swap(director.working_solution(), 1, 2).into();
    assert_ne!(either_change, either_swap);
    assert_eq!(either_change, EitherMove::Change(change(1, 2)));
}

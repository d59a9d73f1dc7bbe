//! Tests for the move selectors.

use super::*;
use crate::heuristic::r#move::{ChangeMove, EitherMove, Move};
use crate::scope::PhaseScope;
use localforge_core::SimpleScore;
use localforge_test::nqueens::{
    create_nqueens_director, get_queen_row, queen_count, row_range, set_queen_row,
    NQueensDirector, NQueensSolution,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn accessor() -> VariableAccessor<NQueensSolution, i64> {
    VariableAccessor::new(0, "row", get_queen_row, set_queen_row, queen_count, row_range)
}

fn phase_scope(seed: u64) -> PhaseScope<NQueensSolution> {
    PhaseScope::new(0, SimpleScore::of(0), SimpleScore::of(0), StdRng::seed_from_u64(seed))
}

fn drain<M, MS>(selector: &mut MS, director: &NQueensDirector) -> Vec<M>
where
    M: Move<NQueensSolution>,
    MS: MoveSelector<NQueensSolution, M>,
{
    selector.step_started(director);
    std::iter::from_fn(|| selector.next_move(director)).collect()
}

#[test]
fn test_change_selector_original_order() {
    let director = create_nqueens_director(&[0, 1, 2]);
    let mut selector = ChangeMoveSelector::new(accessor(), SelectionOrder::Original);
    assert!(!selector.is_never_ending());
    assert_eq!(selector.size(&director), 9);

    let moves: Vec<ChangeMove<_, _>> = drain(&mut selector, &director);
    let pairs: Vec<(usize, i64)> = moves
        .iter()
        .map(|m| (m.entity_index(), *m.to_value().unwrap()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (0, 0), (0, 1), (0, 2),
            (1, 0), (1, 1), (1, 2),
            (2, 0), (2, 1), (2, 2),
        ]
    );

    // Every step starts over.
    assert_eq!(drain(&mut selector, &director).len(), 9);
}

#[test]
fn test_swap_selector_original_order() {
    let director = create_nqueens_director(&[0, 1, 2, 3]);
    let mut selector = SwapMoveSelector::new(accessor(), SelectionOrder::Original);
    assert_eq!(selector.size(&director), 6);

    let moves = drain(&mut selector, &director);
    let pairs: Vec<(usize, usize)> = moves
        .iter()
        .map(|m| (m.left_entity_index(), m.right_entity_index()))
        .collect();
    assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
}

#[test]
fn test_random_change_selector_is_reproducible() {
    let director = create_nqueens_director(&[0, 1, 2, 3]);
    let sample = |seed: u64| {
        let mut selector = ChangeMoveSelector::new(accessor(), SelectionOrder::Random);
        selector.phase_started(&mut phase_scope(seed));
        selector.step_started(&director);
        (0..50)
            .map(|_| selector.next_move(&director).unwrap())
            .collect::<Vec<_>>()
    };

    let first = sample(7);
    assert_eq!(first, sample(7));
    assert!(first
        .iter()
        .all(|m| m.entity_index() < 4 && (0..4).contains(m.to_value().unwrap())));
}

#[test]
fn test_random_swap_selector_picks_distinct_entities() {
    let director = create_nqueens_director(&[0, 1, 2]);
    let mut selector = SwapMoveSelector::new(accessor(), SelectionOrder::Random);
    assert!(selector.is_never_ending());
    selector.phase_started(&mut phase_scope(3));
    selector.step_started(&director);
    for _ in 0..100 {
        let m = selector.next_move(&director).unwrap();
        assert_ne!(m.left_entity_index(), m.right_entity_index());
    }
}

#[test]
fn test_union_selector_original_order_concatenates() {
    let director = create_nqueens_director(&[0, 1, 2]);
    let mut selector = EitherMoveSelector::Union(UnionMoveSelector::new(
        vec![
            EitherMoveSelector::Change(ChangeMoveSelector::new(accessor(), SelectionOrder::Original)),
            EitherMoveSelector::Swap(SwapMoveSelector::new(accessor(), SelectionOrder::Original)),
        ],
        SelectionOrder::Original,
    ));
    assert!(!selector.is_never_ending());
    assert_eq!(selector.size(&director), 12);

    let moves = drain(&mut selector, &director);
    assert_eq!(moves.len(), 12);
    assert!(moves[..9].iter().all(|m| matches!(m, EitherMove::Change(_))));
    assert!(moves[9..].iter().all(|m| matches!(m, EitherMove::Swap(_))));
}

#[test]
fn test_union_selector_random_order_uses_all_children() {
    let director = create_nqueens_director(&[0, 1, 2, 3]);
    let mut selector = EitherMoveSelector::Union(UnionMoveSelector::new(
        vec![
            EitherMoveSelector::Change(ChangeMoveSelector::new(accessor(), SelectionOrder::Random)),
            EitherMoveSelector::Swap(SwapMoveSelector::new(accessor(), SelectionOrder::Random)),
        ],
        SelectionOrder::Random,
    ));
    assert!(selector.is_never_ending());
    selector.phase_started(&mut phase_scope(11));
    selector.step_started(&director);

    let moves: Vec<_> = (0..200)
        .map(|_| selector.next_move(&director).unwrap())
        .collect();
    assert!(moves.iter().any(|m| matches!(m, EitherMove::Change(_))));
    assert!(moves.iter().any(|m| matches!(m, EitherMove::Swap(_))));
}

#[test]
fn test_list_selector_repeats_every_step() {
    let director = create_nqueens_director(&[0, 1]);
    let moves = vec![
        ChangeMove::new(0, Some(1i64), get_queen_row, set_queen_row, "row", 0),
        ChangeMove::new(1, Some(0i64), get_queen_row, set_queen_row, "row", 0),
    ];
    let mut selector = ListMoveSelector::new(moves.clone());
    assert_eq!(drain(&mut selector, &director), moves);
    assert_eq!(drain(&mut selector, &director), moves);
}

#[test]
fn test_random_union_skips_exhausted_children() {
    let director = create_nqueens_director(&[0, 1, 2]);
    for seed in 0..20 {
        let mut selector = EitherMoveSelector::Union(UnionMoveSelector::new(
            vec![
                EitherMoveSelector::Change(ChangeMoveSelector::new(accessor(), SelectionOrder::Original)),
                EitherMoveSelector::Swap(SwapMoveSelector::new(accessor(), SelectionOrder::Original)),
            ],
            SelectionOrder::Random,
        ));
        selector.phase_started(&mut phase_scope(seed));

        let moves = drain(&mut selector, &director);
        assert_eq!(moves.len(), 12, "seed {seed}");
        assert_eq!(moves.iter().filter(|m| matches!(m, EitherMove::Change(_))).count(), 9);
        assert_eq!(moves.iter().filter(|m| matches!(m, EitherMove::Swap(_))).count(), 3);

        // The next step offers every move again.
        assert_eq!(drain(&mut selector, &director).len(), 12);
    }
}

#[test]
fn test_random_union_keeps_drawing_from_never_ending_children() {
    let director = create_nqueens_director(&[0, 1]);
    let mut selector = EitherMoveSelector::Union(UnionMoveSelector::new(
        vec![
            EitherMoveSelector::Change(ChangeMoveSelector::new(accessor(), SelectionOrder::Original)),
            EitherMoveSelector::Swap(SwapMoveSelector::new(accessor(), SelectionOrder::Random)),
        ],
        SelectionOrder::Random,
    ));
    selector.phase_started(&mut phase_scope(5));
    selector.step_started(&director);

    let moves: Vec<_> = (0..100).map(|_| selector.next_move(&director).unwrap()).collect();
    assert_eq!(moves.iter().filter(|m| matches!(m, EitherMove::Change(_))).count(), 4);
}

#[test]
fn test_problem_scale_of_a_union_is_the_largest_child() {
    let director = create_nqueens_director(&[0, 1, 2, 3, 4]);
    let selector = EitherMoveSelector::Union(UnionMoveSelector::new(
        vec![
            EitherMoveSelector::Change(ChangeMoveSelector::new(accessor(), SelectionOrder::Original)),
            EitherMoveSelector::Swap(SwapMoveSelector::new(accessor(), SelectionOrder::Original)),
        ],
        SelectionOrder::Original,
    ));
    assert_eq!(selector.problem_scale(&director), crate::scope::ProblemScale::new(5, 5));
    let list = ListMoveSelector::new(vec![ChangeMove::new(0, Some(1i64), get_queen_row, set_queen_row, "row", 0)]);
    assert_eq!(
        MoveSelector::<NQueensSolution, ChangeMove<NQueensSolution, i64>>::problem_scale(&list, &director),
        crate::scope::ProblemScale::default()
    );
}

//! Union move selector.

use std::fmt::Debug;
use std::marker::PhantomData;

use localforge_config::SelectionOrder;
use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::heuristic::r#move::Move;
use crate::scope::{PhaseScope, ProblemScale};

use super::MoveSelector;

/// Combines child selectors that yield the same move type.
///
/// `Original` order drains the children one after another. `Random` order
/// picks a child for every move with probability proportional to its size.
/// A finite child that runs dry is left out of the draw until the next step.
pub struct UnionMoveSelector<S, M, C> {
    children: Vec<C>,
    selection_order: SelectionOrder,
    rng: StdRng,
    child_cursor: usize,
    exhausted: Vec<bool>,
    _phantom: PhantomData<fn() -> (S, M)>,
}

impl<S, M, C: Debug> Debug for UnionMoveSelector<S, M, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionMoveSelector")
            .field("children", &self.children)
            .field("selection_order", &self.selection_order)
            .finish()
    }
}

impl<S, M, C> UnionMoveSelector<S, M, C> {
    pub fn new(children: Vec<C>, selection_order: SelectionOrder) -> Self {
        let exhausted = vec![false; children.len()];
        Self {
            children,
            selection_order,
            rng: StdRng::seed_from_u64(0),
            child_cursor: 0,
            exhausted,
            _phantom: PhantomData,
        }
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }
}

impl<S, M, C> MoveSelector<S, M> for UnionMoveSelector<S, M, C>
where
    S: PlanningSolution,
    M: Move<S>,
    C: MoveSelector<S, M>,
{
    fn solving_started(&mut self) {
        self.children.iter_mut().for_each(|c| c.solving_started());
    }

    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        self.rng = phase_scope.fork_random();
        for child in &mut self.children {
            child.phase_started(phase_scope);
        }
    }

    fn step_started<D: ScoreDirector<S>>(&mut self, score_director: &D) {
        self.child_cursor = 0;
        self.exhausted.fill(false);
        for child in &mut self.children {
            child.step_started(score_director);
        }
    }

    fn next_move<D: ScoreDirector<S>>(&mut self, score_director: &D) -> Option<M> {
        match self.selection_order {
            SelectionOrder::Original => {
                while let Some(child) = self.children.get_mut(self.child_cursor) {
                    if let Some(m) = child.next_move(score_director) {
                        return Some(m);
                    }
                    self.child_cursor += 1;
                }
                None
            }
            SelectionOrder::Random => loop {
                let sizes: Vec<usize> = self
                    .children
                    .iter()
                    .zip(&self.exhausted)
                    .map(|(child, &exhausted)| if exhausted { 0 } else { child.size(score_director) })
                    .collect();
                let total: usize = sizes.iter().sum();
                if total == 0 {
                    return None;
                }
                let mut pick = self.rng.random_range(0..total);
                let index = sizes.iter().position(|&size| {
                    if pick < size {
                        return true;
                    }
                    pick -= size;
                    false
                })?;
                match self.children[index].next_move(score_director) {
                    Some(m) => return Some(m),
                    None => self.exhausted[index] = true,
                }
            },
        }
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        self.children.iter().map(|c| c.size(score_director)).sum()
    }

    fn problem_scale<D: ScoreDirector<S>>(&self, score_director: &D) -> ProblemScale {
        self.children
            .iter()
            .map(|c| c.problem_scale(score_director))
            .fold(ProblemScale::default(), ProblemScale::max)
    }

    fn is_never_ending(&self) -> bool {
        self.selection_order == SelectionOrder::Random
            || self.children.iter().any(|c| c.is_never_ending())
    }

    fn step_ended(&mut self) {
        self.children.iter_mut().for_each(|c| c.step_ended());
    }

    fn phase_ended(&mut self) {
        self.children.iter_mut().for_each(|c| c.phase_ended());
    }

    fn solving_ended(&mut self) {
        self.children.iter_mut().for_each(|c| c.solving_ended());
    }
}

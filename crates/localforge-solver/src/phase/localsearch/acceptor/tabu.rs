//! Tabu acceptors.
//!
//! Entity, value, move and undo move tabu share one bookkeeping core and
//! only differ in what they record for a step and what they look up for
//! a candidate move.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use localforge_core::PlanningSolution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Acceptor;
use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, PhaseScope, ProblemScale, StepScope};

/// What a tabu acceptor forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabuKind {
    /// The entities changed by recent steps.
    Entity,
    /// The values assigned by recent steps.
    Value,
    /// Recent step moves themselves.
    Move,
    /// The undo moves of recent steps.
    UndoMove,
}

/// How many steps an item stays tabu.
///
/// Ratios are resolved against the entity or value count of the working
/// solution when the phase starts, rounded and kept between 1 and one
/// less than that count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabuSize {
    Fixed(usize),
    EntityRatio(f64),
    ValueRatio(f64),
}

impl TabuSize {
    pub fn resolve(self, problem_scale: ProblemScale) -> u64 {
        match self {
            TabuSize::Fixed(size) => size as u64,
            TabuSize::EntityRatio(ratio) => ratio_size(problem_scale.entity_count, ratio),
            TabuSize::ValueRatio(ratio) => ratio_size(problem_scale.value_count, ratio),
        }
    }
}

fn ratio_size(count: usize, ratio: f64) -> u64 {
    let size = (count as f64 * ratio).round() as u64;
    size.clamp(1, (count as u64).saturating_sub(1).max(1))
}

/// An item on a tabu list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TabuKey<M> {
    Entity(usize),
    Value(u64),
    Move(M),
}

/// Forbids moves that touch something a recent step touched.
///
/// An item recorded at step `t` is tabu at step `i` while
/// `i - t <= tabu_size`. For the `fading_tabu_size` steps after that the
/// item is accepted with a chance that grows linearly towards 1, drawn
/// from the phase random. All items of one step are recorded at that
/// step's index. With aspiration enabled (the default) a tabu move is
/// still accepted if it beats the best score.
///
/// # Example
///
/// ```
/// use localforge_solver::phase::localsearch::{TabuAcceptor, TabuKind, TabuSize};
/// use localforge_solver::heuristic::ChangeMove;
/// use localforge_test::nqueens::NQueensSolution;
///
/// let acceptor: TabuAcceptor<NQueensSolution, ChangeMove<NQueensSolution, i64>> =
///     TabuAcceptor::new(TabuKind::Entity, 7).with_fading_tabu_size(TabuSize::EntityRatio(0.1));
/// assert_eq!(acceptor.tabu_size(), TabuSize::Fixed(7));
/// ```
pub struct TabuAcceptor<S, M> {
    kind: TabuKind,
    tabu_size: TabuSize,
    fading_tabu_size: TabuSize,
    aspiration_enabled: bool,
    working_tabu_size: u64,
    working_fading_tabu_size: u64,
    rng: StdRng,
    tabu_to_step_index: HashMap<TabuKey<M>, u64>,
    tabu_sequence: VecDeque<TabuKey<M>>,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, M: Debug> Debug for TabuAcceptor<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabuAcceptor")
            .field("kind", &self.kind)
            .field("tabu_size", &self.tabu_size)
            .field("fading_tabu_size", &self.fading_tabu_size)
            .field("aspiration_enabled", &self.aspiration_enabled)
            .field("tabu_count", &self.tabu_sequence.len())
            .finish()
    }
}

impl<S, M> TabuAcceptor<S, M> {
    pub fn new(kind: TabuKind, tabu_size: usize) -> Self {
        Self::sized(kind, TabuSize::Fixed(tabu_size))
    }

    pub fn sized(kind: TabuKind, tabu_size: TabuSize) -> Self {
        Self {
            kind,
            tabu_size,
            fading_tabu_size: TabuSize::Fixed(0),
            aspiration_enabled: true,
            working_tabu_size: tabu_size.resolve(ProblemScale::default()),
            working_fading_tabu_size: 0,
            rng: StdRng::seed_from_u64(0),
            tabu_to_step_index: HashMap::new(),
            tabu_sequence: VecDeque::new(),
            _phantom: PhantomData,
        }
    }

    pub fn with_fading_tabu_size(mut self, fading_tabu_size: TabuSize) -> Self {
        self.fading_tabu_size = fading_tabu_size;
        self.working_fading_tabu_size = self.fading_tabu_size.resolve(ProblemScale::default());
        self
    }

    pub fn with_aspiration(mut self, aspiration_enabled: bool) -> Self {
        self.aspiration_enabled = aspiration_enabled;
        self
    }

    pub fn kind(&self) -> TabuKind {
        self.kind
    }

    pub fn tabu_size(&self) -> TabuSize {
        self.tabu_size
    }

    pub fn fading_tabu_size(&self) -> TabuSize {
        self.fading_tabu_size
    }

    /// Chance to accept an item `fading_step_count` steps into its fading
    /// window. Never 0 or 1 inside the window.
    fn fading_accept_chance(&self, fading_step_count: u64) -> f64 {
        (fading_step_count + 1) as f64 / (self.working_fading_tabu_size + 1) as f64
    }
}

impl<S, M> TabuAcceptor<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    /// Items a candidate move is checked against.
    fn find_tabu(&self, mv: &M) -> Vec<TabuKey<M>> {
        match self.kind {
            TabuKind::Entity => mv.planning_entities().into_iter().map(TabuKey::Entity).collect(),
            TabuKind::Value => mv.planning_values().into_iter().map(TabuKey::Value).collect(),
            TabuKind::Move | TabuKind::UndoMove => vec![TabuKey::Move(mv.clone())],
        }
    }

    /// Items a completed step makes tabu.
    fn find_new_tabu(&self, step_scope: &StepScope<S, M>) -> Vec<TabuKey<M>> {
        match self.kind {
            TabuKind::UndoMove => step_scope
                .undo_step()
                .map(|undo| vec![TabuKey::Move(undo.clone())])
                .unwrap_or_default(),
            _ => step_scope
                .step()
                .map(|step| self.find_tabu(step))
                .unwrap_or_default(),
        }
    }

    fn maximum_tabu_step_index(&self, mv: &M) -> Option<u64> {
        self.find_tabu(mv)
            .iter()
            .filter_map(|key| self.tabu_to_step_index.get(key).copied())
            .max()
    }
}

impl<S, M> Acceptor<S, M> for TabuAcceptor<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        let problem_scale = phase_scope.problem_scale();
        self.working_tabu_size = self.tabu_size.resolve(problem_scale);
        self.working_fading_tabu_size = self.fading_tabu_size.resolve(problem_scale);
        self.rng = phase_scope.fork_random();
        self.tabu_to_step_index.clear();
        self.tabu_sequence.clear();
    }

    fn is_accepted(&mut self, move_scope: &MoveScope<S, M>, step_scope: &StepScope<S, M>) -> bool {
        let Some(tabu_step_index) = self.maximum_tabu_step_index(move_scope.get_move()) else {
            return true;
        };
        if self.aspiration_enabled && move_scope.score() > step_scope.best_score() {
            return true;
        }
        let tabu_step_count = step_scope.step_index() - tabu_step_index;
        if tabu_step_count <= self.working_tabu_size {
            return false;
        }
        let fading_step_count = tabu_step_count - self.working_tabu_size - 1;
        if fading_step_count >= self.working_fading_tabu_size {
            return true;
        }
        let chance = self.fading_accept_chance(fading_step_count);
        self.rng.random::<f64>() < chance
    }

    fn step_ended(&mut self, step_scope: &StepScope<S, M>) {
        let step_index = step_scope.step_index();
        for key in self.find_new_tabu(step_scope) {
            if self.tabu_to_step_index.insert(key.clone(), step_index).is_some() {
                self.tabu_sequence.retain(|k| *k != key);
            }
            self.tabu_sequence.push_back(key);
        }

        // Drop items that will no longer be tabu at the next step.
        while let Some(oldest) = self.tabu_sequence.front() {
            let oldest_step_index = self.tabu_to_step_index.get(oldest).copied().unwrap_or(0);
            if step_index - oldest_step_index < self.working_tabu_size + self.working_fading_tabu_size {
                break;
            }
            if let Some(oldest) = self.tabu_sequence.pop_front() {
                self.tabu_to_step_index.remove(&oldest);
            }
        }
    }

    fn phase_ended(&mut self, _phase_scope: &PhaseScope<S>) {
        self.tabu_to_step_index.clear();
        self.tabu_sequence.clear();
    }
}

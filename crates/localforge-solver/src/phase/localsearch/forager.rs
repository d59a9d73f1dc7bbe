//! Foragers for local search move selection
//!
//! Foragers collect evaluated moves during a step and pick the one that
//! becomes the step.

use std::cmp::Ordering;
use std::fmt::Debug;

use localforge_config::{FinalistPodiumType, PickEarlyType};
use localforge_core::{PlanningSolution, Score};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::heuristic::r#move::Move;
use crate::scope::{MoveScope, PhaseScope, StepScope};

/// Trait for collecting and selecting moves in local search.
///
/// Foragers are responsible for:
/// - Collecting evaluated moves during a step
/// - Deciding when to quit evaluating early
/// - Selecting the move that becomes the step
pub trait LocalSearchForager<S: PlanningSolution, M: Move<S>>: Send + Debug {
    fn phase_started(&mut self, _phase_scope: &mut PhaseScope<S>) {}

    /// Called at the start of each step to reset state.
    fn step_started(&mut self, step_scope: &StepScope<S, M>);

    /// Adds an evaluated move, accepted or not.
    fn add_move(&mut self, move_scope: MoveScope<S, M>);

    /// Returns true if no further moves need to be evaluated this step.
    fn is_quit_early(&self) -> bool;

    /// Picks the move that becomes the step, if any.
    fn pick_move(&mut self, step_scope: &StepScope<S, M>) -> Option<MoveScope<S, M>>;

    /// Returns true if this forager can work with a never ending selector.
    fn supports_never_ending_move_selector(&self) -> bool;

    fn step_ended(&mut self, _step_scope: &StepScope<S, M>) {}

    fn phase_ended(&mut self, _phase_scope: &PhaseScope<S>) {}
}

/// Ranks the candidates of one step against each other.
#[derive(Debug, Clone, Copy)]
struct Podium<Sc> {
    podium_type: FinalistPodiumType,
    reference_score: Option<Sc>,
}

impl<Sc: Score> Podium<Sc> {
    fn rank(&self, candidate: Sc, incumbent: Sc) -> Ordering {
        match (self.podium_type, self.reference_score) {
            (FinalistPodiumType::HighestScore, _) | (_, None) => candidate.cmp(&incumbent),
            (_, Some(reference)) => oscillate_by_level(candidate, incumbent, reference),
        }
    }
}

/// Prefers the score that is above `reference` on the highest level where
/// only one of the two is. Falls back to plain comparison once either
/// score improves on `reference` as a whole.
fn oscillate_by_level<Sc: Score>(candidate: Sc, incumbent: Sc, reference: Sc) -> Ordering {
    if candidate > reference || incumbent > reference {
        return candidate.cmp(&incumbent);
    }
    let candidate_levels = candidate.to_level_numbers();
    let incumbent_levels = incumbent.to_level_numbers();
    let reference_levels = reference.to_level_numbers();
    for ((c, i), r) in candidate_levels.iter().zip(&incumbent_levels).zip(&reference_levels) {
        match (c > r, i > r) {
            (true, true) => break,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
    }
    candidate.cmp(&incumbent)
}

/// Running maximum over a stream of moves with tie counting.
struct Incumbent<S: PlanningSolution, M> {
    best: Option<MoveScope<S, M>>,
    tie_count: u64,
}

impl<S: PlanningSolution, M> Incumbent<S, M> {
    fn new() -> Self {
        Self {
            best: None,
            tie_count: 0,
        }
    }

    fn clear(&mut self) {
        self.best = None;
        self.tie_count = 0;
    }

    /// Offers a candidate. Ties replace the incumbent with chance
    /// `1 / tie_count` when `rng` is given, which keeps every tied move
    /// equally likely. Without `rng` the first one seen stays.
    fn offer(&mut self, candidate: MoveScope<S, M>, podium: &Podium<S::Score>, rng: Option<&mut StdRng>) {
        let Some(best) = &self.best else {
            self.best = Some(candidate);
            self.tie_count = 1;
            return;
        };
        match podium.rank(candidate.score(), best.score()) {
            Ordering::Greater => {
                self.best = Some(candidate);
                self.tie_count = 1;
            }
            Ordering::Equal => {
                self.tie_count += 1;
                if let Some(rng) = rng {
                    if rng.random_range(0..self.tie_count) == 0 {
                        self.best = Some(candidate);
                    }
                }
            }
            Ordering::Less => {}
        }
    }

    fn take(&mut self) -> Option<MoveScope<S, M>> {
        self.tie_count = 0;
        self.best.take()
    }
}

/// The canonical local search forager.
///
/// Keeps the best accepted move of the step and, as a fallback for steps
/// in which nothing was accepted, the best move overall. Quits early once
/// `accepted_count_limit` moves were accepted, or on the first accepted
/// move that improves the best score or last step score, depending on the
/// [`PickEarlyType`]. The [`FinalistPodiumType`] decides which of two
/// candidates ranks higher.
///
/// # Example
///
/// ```
/// use localforge_config::PickEarlyType;
/// use localforge_solver::phase::localsearch::AcceptedForager;
/// use localforge_solver::heuristic::ChangeMove;
/// use localforge_test::nqueens::NQueensSolution;
///
/// let forager: AcceptedForager<NQueensSolution, ChangeMove<NQueensSolution, i64>> =
///     AcceptedForager::new(PickEarlyType::Never, Some(1000), true);
/// ```
pub struct AcceptedForager<S: PlanningSolution, M> {
    pick_early_type: PickEarlyType,
    accepted_count_limit: Option<u64>,
    break_tie_randomly: bool,
    finalist_podium_type: FinalistPodiumType,
    rng: StdRng,
    step_best_score: Option<S::Score>,
    step_last_score: Option<S::Score>,
    selected_count: u64,
    accepted_count: u64,
    early_pick: Option<MoveScope<S, M>>,
    best_accepted: Incumbent<S, M>,
    best_rejected: Incumbent<S, M>,
}

impl<S: PlanningSolution, M> Debug for AcceptedForager<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceptedForager")
            .field("pick_early_type", &self.pick_early_type)
            .field("accepted_count_limit", &self.accepted_count_limit)
            .field("break_tie_randomly", &self.break_tie_randomly)
            .field("finalist_podium_type", &self.finalist_podium_type)
            .field("selected_count", &self.selected_count)
            .field("accepted_count", &self.accepted_count)
            .finish()
    }
}

impl<S: PlanningSolution, M> AcceptedForager<S, M> {
    /// Creates a forager.
    ///
    /// # Arguments
    /// * `pick_early_type` - When to stop a step before the selector runs dry
    /// * `accepted_count_limit` - Stop after this many accepted moves, `None` for unbounded
    /// * `break_tie_randomly` - Pick uniformly among equally scored moves instead of the first
    pub fn new(
        pick_early_type: PickEarlyType,
        accepted_count_limit: Option<usize>,
        break_tie_randomly: bool,
    ) -> Self {
        Self {
            pick_early_type,
            accepted_count_limit: accepted_count_limit.map(|l| l as u64),
            break_tie_randomly,
            finalist_podium_type: FinalistPodiumType::default(),
            rng: StdRng::seed_from_u64(0),
            step_best_score: None,
            step_last_score: None,
            selected_count: 0,
            accepted_count: 0,
            early_pick: None,
            best_accepted: Incumbent::new(),
            best_rejected: Incumbent::new(),
        }
    }

    pub fn with_finalist_podium_type(mut self, finalist_podium_type: FinalistPodiumType) -> Self {
        self.finalist_podium_type = finalist_podium_type;
        self
    }

    pub fn finalist_podium_type(&self) -> FinalistPodiumType {
        self.finalist_podium_type
    }

    pub fn accepted_count_limit(&self) -> Option<usize> {
        self.accepted_count_limit.map(|l| l as usize)
    }

    pub fn pick_early_type(&self) -> PickEarlyType {
        self.pick_early_type
    }

    fn podium(&self) -> Podium<S::Score> {
        let reference_score = match self.finalist_podium_type {
            FinalistPodiumType::StrategicOscillationByLevelOnBestScore => self.step_best_score,
            _ => self.step_last_score,
        };
        Podium {
            podium_type: self.finalist_podium_type,
            reference_score,
        }
    }

    fn is_early_pick(&self, score: S::Score) -> bool {
        match self.pick_early_type {
            PickEarlyType::Never => false,
            PickEarlyType::FirstBestScoreImproving => {
                self.step_best_score.is_some_and(|best| score > best)
            }
            PickEarlyType::FirstLastStepScoreImproving => {
                self.step_last_score.is_some_and(|last| score > last)
            }
        }
    }
}

impl<S, M> LocalSearchForager<S, M> for AcceptedForager<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn phase_started(&mut self, phase_scope: &mut PhaseScope<S>) {
        self.rng = phase_scope.fork_random();
    }

    fn step_started(&mut self, step_scope: &StepScope<S, M>) {
        self.step_best_score = Some(step_scope.best_score());
        self.step_last_score = Some(step_scope.last_step_score());
        self.selected_count = 0;
        self.accepted_count = 0;
        self.early_pick = None;
        self.best_accepted.clear();
        self.best_rejected.clear();
    }

    fn add_move(&mut self, move_scope: MoveScope<S, M>) {
        self.selected_count += 1;
        let podium = self.podium();
        if !move_scope.is_accepted() {
            let rng = self.break_tie_randomly.then_some(&mut self.rng);
            self.best_rejected.offer(move_scope, &podium, rng);
            return;
        }
        self.accepted_count += 1;
        if self.early_pick.is_none() && self.is_early_pick(move_scope.score()) {
            self.early_pick = Some(move_scope);
            return;
        }
        let rng = self.break_tie_randomly.then_some(&mut self.rng);
        self.best_accepted.offer(move_scope, &podium, rng);
    }

    fn is_quit_early(&self) -> bool {
        self.early_pick.is_some()
            || self
                .accepted_count_limit
                .is_some_and(|limit| self.accepted_count >= limit)
    }

    fn pick_move(&mut self, _step_scope: &StepScope<S, M>) -> Option<MoveScope<S, M>> {
        self.early_pick
            .take()
            .or_else(|| self.best_accepted.take())
            .or_else(|| self.best_rejected.take())
    }

    fn supports_never_ending_move_selector(&self) -> bool {
        self.accepted_count_limit.is_some()
    }

    fn step_ended(&mut self, _step_scope: &StepScope<S, M>) {
        self.early_pick = None;
        self.best_accepted.clear();
        self.best_rejected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::r#move::ChangeMove;
    use localforge_core::SimpleScore;
    use localforge_test::nqueens::{get_queen_row, set_queen_row, NQueensSolution};

    type TestMove = ChangeMove<NQueensSolution, i64>;
    type TestForager = AcceptedForager<NQueensSolution, TestMove>;

    fn step_scope() -> StepScope<NQueensSolution, TestMove> {
        // Best -10, last step -100.
        StepScope::new(0, SimpleScore::of(-100), SimpleScore::of(-10))
    }

    fn scored(move_index: u64, score: i64, accepted: bool) -> MoveScope<NQueensSolution, TestMove> {
        let m = ChangeMove::new(0, Some(move_index as i64), get_queen_row, set_queen_row, "row", 0);
        let mut scope = MoveScope::new(0, move_index, m, SimpleScore::of(score));
        scope.set_accepted(accepted);
        scope
    }

    fn started(mut forager: TestForager, seed: u64) -> TestForager {
        let mut phase = PhaseScope::new(0, SimpleScore::of(-100), SimpleScore::of(-10), StdRng::seed_from_u64(seed));
        forager.phase_started(&mut phase);
        forager.step_started(&step_scope());
        forager
    }

    #[test]
    fn test_picks_best_accepted_move() {
        let mut forager = started(TestForager::new(PickEarlyType::Never, None, false), 0);
        let step = step_scope();
        forager.add_move(scored(0, -20, false));
        assert!(!forager.is_quit_early());
        forager.add_move(scored(1, -30, true));
        forager.add_move(scored(2, -5, false));
        forager.add_move(scored(3, -25, true));
        assert!(!forager.is_quit_early());

        let picked = forager.pick_move(&step).unwrap();
        assert_eq!(picked.move_index(), 3);
        assert_eq!(picked.score(), SimpleScore::of(-25));
    }

    #[test]
    fn test_accepted_count_limit_with_random_tie_break() {
        for seed in 0..8 {
            let mut forager = started(TestForager::new(PickEarlyType::Never, Some(4), true), seed);
            let step = step_scope();
            forager.add_move(scored(0, -20, false));
            forager.add_move(scored(1, -1, true));
            forager.add_move(scored(2, -1, true));
            forager.add_move(scored(3, -20, true));
            assert!(!forager.is_quit_early());
            forager.add_move(scored(4, -1, true));
            assert!(forager.is_quit_early());

            let picked = forager.pick_move(&step).unwrap();
            assert!([1, 2, 4].contains(&picked.move_index()));
            assert_eq!(picked.score(), SimpleScore::of(-1));
        }
    }

    #[test]
    fn test_random_tie_break_is_reproducible() {
        let pick = |seed| {
            let mut forager = started(TestForager::new(PickEarlyType::Never, None, true), seed);
            for i in 0..10 {
                forager.add_move(scored(i, -1, true));
            }
            forager.pick_move(&step_scope()).unwrap().move_index()
        };
        assert_eq!(pick(42), pick(42));
    }

    #[test]
    fn test_first_tie_wins_without_random_tie_break() {
        let mut forager = started(TestForager::new(PickEarlyType::Never, None, false), 0);
        forager.add_move(scored(0, -1, true));
        forager.add_move(scored(1, -1, true));
        forager.add_move(scored(2, -1, true));
        assert_eq!(forager.pick_move(&step_scope()).unwrap().move_index(), 0);
    }

    #[test]
    fn test_pick_early_first_best_score_improving() {
        let mut forager = started(TestForager::new(PickEarlyType::FirstBestScoreImproving, None, false), 0);
        forager.add_move(scored(0, -1, false));
        assert!(!forager.is_quit_early());
        forager.add_move(scored(1, -20, true));
        assert!(!forager.is_quit_early());
        forager.add_move(scored(2, -300, true));
        assert!(!forager.is_quit_early());
        forager.add_move(scored(3, -1, true));
        assert!(forager.is_quit_early());
        assert_eq!(forager.pick_move(&step_scope()).unwrap().move_index(), 3);
    }

    #[test]
    fn test_pick_early_first_last_step_score_improving() {
        let mut forager = started(TestForager::new(PickEarlyType::FirstLastStepScoreImproving, None, false), 0);
        forager.add_move(scored(0, -120, true));
        assert!(!forager.is_quit_early());
        forager.add_move(scored(1, -50, true));
        assert!(forager.is_quit_early());
        assert_eq!(forager.pick_move(&step_scope()).unwrap().move_index(), 1);
    }

    #[test]
    fn test_falls_back_to_best_rejected_move() {
        let mut forager = started(TestForager::new(PickEarlyType::Never, None, false), 0);
        forager.add_move(scored(0, -50, false));
        forager.add_move(scored(1, -40, false));
        forager.add_move(scored(2, -60, false));
        assert_eq!(forager.pick_move(&step_scope()).unwrap().move_index(), 1);
    }

    #[test]
    fn test_empty_step_picks_nothing() {
        let mut forager = started(TestForager::new(PickEarlyType::Never, Some(1), false), 0);
        assert!(forager.pick_move(&step_scope()).is_none());
    }

    #[test]
    fn test_step_started_resets_state() {
        let mut forager = started(TestForager::new(PickEarlyType::Never, Some(2), false), 0);
        forager.add_move(scored(0, -1, true));
        forager.add_move(scored(1, -1, true));
        assert!(forager.is_quit_early());
        forager.step_started(&step_scope());
        assert!(!forager.is_quit_early());
        assert!(forager.pick_move(&step_scope()).is_none());
    }

    #[test]
    fn test_never_ending_support_requires_limit() {
        assert!(!TestForager::new(PickEarlyType::Never, None, true).supports_never_ending_move_selector());
        assert!(TestForager::new(PickEarlyType::Never, Some(1), true).supports_never_ending_move_selector());
    }

    #[test]
    fn test_random_tie_break_is_uniform() {
        let mut counts = [0u32; 4];
        for seed in 0..20_000 {
            let mut forager = started(TestForager::new(PickEarlyType::Never, None, true), seed);
            forager.add_move(scored(0, -30, true));
            for i in 1..=4 {
                forager.add_move(scored(i, -2, true));
            }
            forager.add_move(scored(5, -40, true));
            let picked = forager.pick_move(&step_scope()).unwrap().move_index();
            counts[picked as usize - 1] += 1;
        }
        for count in counts {
            assert!((4700..=5300).contains(&count), "{counts:?}");
        }
    }

    mod podium {
        use super::*;
        use localforge_core::HardSoftScore;
        use localforge_test::shifts::{get_shift_employee, set_shift_employee, ShiftSolution};

        type ShiftMove = ChangeMove<ShiftSolution, i64>;

        /// Feeds accepted moves with the given scores and returns the picked index.
        fn pick(
            podium_type: FinalistPodiumType,
            last_step_score: (i64, i64),
            best_score: (i64, i64),
            scores: &[(i64, i64)],
        ) -> u64 {
            let last_step_score = HardSoftScore::of(last_step_score.0, last_step_score.1);
            let best_score = HardSoftScore::of(best_score.0, best_score.1);
            let mut forager = AcceptedForager::<ShiftSolution, ShiftMove>::new(PickEarlyType::Never, None, false)
                .with_finalist_podium_type(podium_type);
            let mut phase = PhaseScope::new(0, last_step_score, best_score, StdRng::seed_from_u64(0));
            forager.phase_started(&mut phase);
            let step = StepScope::new(0, last_step_score, best_score);
            forager.step_started(&step);
            for (i, &(hard, soft)) in scores.iter().enumerate() {
                let m = ChangeMove::new(i, Some(0), get_shift_employee, set_shift_employee, "employee", 0);
                let mut scope = MoveScope::new(0, i as u64, m, HardSoftScore::of(hard, soft));
                scope.set_accepted(true);
                forager.add_move(scope);
            }
            forager.pick_move(&step).unwrap().move_index()
        }

        const BY_LEVEL: FinalistPodiumType = FinalistPodiumType::StrategicOscillationByLevel;

        #[test]
        fn test_highest_score_ignores_the_last_step() {
            let scores = [(-100, -8000), (-100, -7000), (-150, -3000), (-120, -4000)];
            let picked = pick(FinalistPodiumType::HighestScore, (-100, -7000), (-100, -7000), &scores);
            assert_eq!(picked, 1);
        }

        #[test]
        fn test_oscillation_compares_plainly_once_the_last_step_is_beaten() {
            let scores = [(-150, -2000), (-100, -7000), (-100, -7100), (-200, -1000)];
            assert_eq!(pick(BY_LEVEL, (-200, -5000), (-200, -5000), &scores), 1);
        }

        #[test]
        fn test_oscillation_prefers_improving_a_lower_level() {
            let scores = [
                (-100, -8000),
                (-100, -7000),
                (-150, -3000),
                (-120, -4000),
                (-150, -2000),
                (-200, -1000),
            ];
            assert_eq!(pick(BY_LEVEL, (-100, -7000), (-100, -7000), &scores), 3);

            let scores = [
                (-120, -4000),
                (-120, -5000),
                (-150, -3000),
                (-150, -1000),
                (-150, -2000),
                (-160, -500),
            ];
            assert_eq!(pick(BY_LEVEL, (-120, -4000), (-100, -7000), &scores), 3);
        }

        #[test]
        fn test_oscillation_on_best_score_uses_the_best_score_as_reference() {
            let scores = [
                (-110, -8000),
                (-150, -3000),
                (-150, -1000),
                (-110, -6000),
                (-150, -2000),
                (-160, -500),
            ];
            let on_best = FinalistPodiumType::StrategicOscillationByLevelOnBestScore;
            assert_eq!(pick(on_best, (-120, -4000), (-100, -7000), &scores), 3);

            let scores = [(-130, -8000), (-150, -5000)];
            assert_eq!(pick(on_best, (-120, -4000), (-100, -7000), &scores), 1);
            assert_eq!(pick(BY_LEVEL, (-120, -4000), (-100, -7000), &scores), 0);
        }
    }
}

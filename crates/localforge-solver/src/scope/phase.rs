//! Phase-level scope.

use std::time::{Duration, Instant};

use localforge_core::PlanningSolution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Entity and value counts of the working solution when a phase starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemScale {
    pub entity_count: usize,
    pub value_count: usize,
}

impl ProblemScale {
    pub fn new(entity_count: usize, value_count: usize) -> Self {
        Self {
            entity_count,
            value_count,
        }
    }

    /// The larger count of each kind.
    pub fn max(self, other: Self) -> Self {
        Self {
            entity_count: self.entity_count.max(other.entity_count),
            value_count: self.value_count.max(other.value_count),
        }
    }
}

/// Scope for a single phase.
///
/// Holds no reference to the solver scope, so the phase can hand both to
/// its decider at the same time.
pub struct PhaseScope<S: PlanningSolution> {
    phase_index: usize,
    start_time: Instant,
    starting_score: S::Score,
    best_score: S::Score,
    best_step_index: Option<u64>,
    best_time: Instant,
    last_completed_step_score: S::Score,
    step_count: u64,
    move_evaluation_count: u64,
    problem_scale: ProblemScale,
    rng: StdRng,
}

impl<S: PlanningSolution> PhaseScope<S> {
    /// Creates a phase scope.
    ///
    /// `best_score` is the best score of the solver so far; it can be
    /// better than `starting_score` when an earlier phase ended on a worse
    /// step.
    pub fn new(phase_index: usize, starting_score: S::Score, best_score: S::Score, rng: StdRng) -> Self {
        let now = Instant::now();
        Self {
            phase_index,
            start_time: now,
            starting_score,
            best_score,
            best_step_index: None,
            best_time: now,
            last_completed_step_score: starting_score,
            step_count: 0,
            move_evaluation_count: 0,
            problem_scale: ProblemScale::default(),
            rng,
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn problem_scale(&self) -> ProblemScale {
        self.problem_scale
    }

    pub fn set_problem_scale(&mut self, problem_scale: ProblemScale) {
        self.problem_scale = problem_scale;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn starting_score(&self) -> S::Score {
        self.starting_score
    }

    pub fn best_score(&self) -> S::Score {
        self.best_score
    }

    /// Index of the step that found the phase best, `None` for the starting solution.
    pub fn best_step_index(&self) -> Option<u64> {
        self.best_step_index
    }

    pub fn time_since_best(&self) -> Duration {
        self.best_time.elapsed()
    }

    /// Index of the last completed step, `None` before the first step.
    pub fn last_completed_step_index(&self) -> Option<u64> {
        self.step_count.checked_sub(1)
    }

    pub fn last_completed_step_score(&self) -> S::Score {
        self.last_completed_step_score
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Index of the step about to start.
    pub fn next_step_index(&self) -> u64 {
        self.step_count
    }

    /// Steps completed since the phase best last improved.
    pub fn unimproved_step_count(&self) -> u64 {
        match self.best_step_index {
            Some(index) => self.step_count - (index + 1),
            None => self.step_count,
        }
    }

    /// Records a completed step; returns true if it improved the phase best.
    pub fn step_ended(&mut self, step_index: u64, step_score: S::Score) -> bool {
        self.step_count = step_index + 1;
        self.last_completed_step_score = step_score;
        if step_score > self.best_score {
            self.best_score = step_score;
            self.best_step_index = Some(step_index);
            self.best_time = Instant::now();
            true
        } else {
            false
        }
    }

    pub fn add_move_evaluation_count(&mut self, count: u64) {
        self.move_evaluation_count += count;
    }

    pub fn move_evaluation_count(&self) -> u64 {
        self.move_evaluation_count
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Creates an independent random seeded from the phase random.
    pub fn fork_random(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.rng.random())
    }
}

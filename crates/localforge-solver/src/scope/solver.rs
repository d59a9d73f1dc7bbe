//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use localforge_config::EnvironmentMode;
use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Top-level scope for the entire solving process.
///
/// Owns the master score director, the solver random and the best
/// solution found so far. Generic over `D: ScoreDirector<S>` for zero type
/// erasure.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    rng: StdRng,
    environment_mode: EnvironmentMode,
    best_solution: Option<S>,
    best_score: Option<S::Score>,
    best_step_count: u64,
    best_time: Option<Instant>,
    start_time: Option<Instant>,
    total_step_count: u64,
    move_evaluation_count: u64,
    terminate_early_flag: Arc<AtomicBool>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    /// Creates a scope seeded from the operating system.
    pub fn new(score_director: D) -> Self {
        Self::with_rng(score_director, StdRng::from_os_rng())
    }

    /// Creates a scope whose random is seeded with `seed`.
    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self::with_rng(score_director, StdRng::seed_from_u64(seed))
    }

    fn with_rng(score_director: D, rng: StdRng) -> Self {
        Self {
            score_director,
            rng,
            environment_mode: EnvironmentMode::default(),
            best_solution: None,
            best_score: None,
            best_step_count: 0,
            best_time: None,
            start_time: None,
            total_step_count: 0,
            move_evaluation_count: 0,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    /// Shares an external flag that stops solving when set.
    pub fn with_terminate_early_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = flag;
        self
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    /// Marks the start of solving and resets the counters.
    pub fn start_solving(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.best_time = Some(now);
        self.total_step_count = 0;
        self.best_step_count = 0;
        self.move_evaluation_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    /// Time since the best score last improved.
    pub fn time_since_best(&self) -> Option<Duration> {
        self.best_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best_score.as_ref()
    }

    /// Recalls the working solution as best if its score beats the best score.
    ///
    /// Returns true if the best solution changed.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.calculate_score();
        let is_better = match &self.best_score {
            None => true,
            Some(best) => current_score > *best,
        };

        if is_better {
            let mut solution = self.score_director.clone_working_solution();
            solution.set_score(Some(current_score));
            self.best_solution = Some(solution);
            self.best_score = Some(current_score);
            self.best_step_count = self.total_step_count;
            self.best_time = Some(Instant::now());
        }
        is_better
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Creates an independent random seeded from the solver random.
    pub fn fork_random(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.rng.random())
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Steps completed since the best score last improved.
    pub fn unimproved_step_count(&self) -> u64 {
        self.total_step_count - self.best_step_count
    }

    pub fn add_move_evaluation_count(&mut self, count: u64) {
        self.move_evaluation_count += count;
    }

    pub fn move_evaluation_count(&self) -> u64 {
        self.move_evaluation_count
    }

    /// Requests the solver to stop at the next termination check.
    pub fn terminate_early(&self) {
        self.terminate_early_flag.store(true, Ordering::SeqCst);
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag.load(Ordering::SeqCst)
    }

    /// Returns the best solution, or the working solution if none was recalled.
    pub fn take_best_or_working_solution(mut self) -> S {
        match self.best_solution.take() {
            Some(best) => best,
            None => {
                let score = self.score_director.calculate_score();
                let mut solution = self.score_director.clone_working_solution();
                solution.set_score(Some(score));
                solution
            }
        }
    }
}

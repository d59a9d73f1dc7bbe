//! Solver implementation.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use localforge_config::EnvironmentMode;
use localforge_core::{PlanningSolution, Result, Score};
use localforge_scoring::ScoreDirector;
use tracing::{debug, info};

use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::{NeverTermination, Termination};

/// The main solver that optimizes planning solutions.
///
/// Runs its phases in order over one [`SolverScope`] and returns the best
/// solution found. Phases are boxed so a solver built from configuration
/// and one assembled by hand have the same type.
///
/// # Example
///
/// ```
/// use localforge_config::PickEarlyType;
/// use localforge_solver::heuristic::r#move::ChangeMove;
/// use localforge_solver::heuristic::selector::{ChangeMoveSelector, SelectionOrder, VariableAccessor};
/// use localforge_solver::phase::localsearch::{
///     AcceptedForager, HillClimbingAcceptor, LocalSearchDecider, LocalSearchPhase,
/// };
/// use localforge_solver::phase::Phase;
/// use localforge_solver::solver::Solver;
/// use localforge_solver::termination::StepCountTermination;
/// use localforge_test::nqueens::{
///     create_nqueens_director, get_queen_row, queen_count, row_range, set_queen_row, NQueensDirector,
///     NQueensSolution,
/// };
///
/// let accessor = VariableAccessor::new(0, "row", get_queen_row, set_queen_row, queen_count, row_range);
/// let decider: LocalSearchDecider<NQueensSolution, ChangeMove<NQueensSolution, i64>, _> = LocalSearchDecider::new(
///     ChangeMoveSelector::new(accessor, SelectionOrder::Original),
///     Box::new(HillClimbingAcceptor::new()),
///     Box::new(AcceptedForager::new(PickEarlyType::Never, None, true)),
/// );
/// let phase: Box<dyn Phase<NQueensSolution, NQueensDirector>> = Box::new(LocalSearchPhase::new(0, decider));
///
/// let mut solver = Solver::new(vec![phase])
///     .with_termination(Box::new(StepCountTermination::new(10)))
///     .with_random_seed(42);
/// let best = solver.solve(create_nqueens_director(&[0, 0, 0, 0])).unwrap();
/// assert!(best.score.is_some());
/// ```
pub struct Solver<S: PlanningSolution, D: ScoreDirector<S>> {
    phases: Vec<Box<dyn Phase<S, D>>>,
    termination: Option<Box<dyn Termination<S, D>>>,
    environment_mode: EnvironmentMode,
    random_seed: Option<u64>,
    terminate_early_flag: Arc<AtomicBool>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Debug for Solver<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("phases", &self.phases)
            .field("termination", &self.termination)
            .field("environment_mode", &self.environment_mode)
            .field("random_seed", &self.random_seed)
            .finish()
    }
}

impl<S, D> Solver<S, D>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    /// Creates a solver without termination, seeded from the operating system.
    pub fn new(phases: Vec<Box<dyn Phase<S, D>>>) -> Self {
        Self {
            phases,
            termination: None,
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the solver termination, checked in every phase.
    pub fn with_termination(mut self, termination: Box<dyn Termination<S, D>>) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn phases(&self) -> &[Box<dyn Phase<S, D>>] {
        &self.phases
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    /// Returns the flag that stops a running solve when set.
    ///
    /// `solve` borrows the solver mutably, so another thread takes this
    /// handle before solving starts. Every solve clears the flag first.
    pub fn terminate_early_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.terminate_early_flag)
    }

    /// Solves the working solution of `score_director`.
    ///
    /// The starting solution is the first best solution. Returns the best
    /// solution with its score set, or the first error a phase raised.
    pub fn solve(&mut self, score_director: D) -> Result<S> {
        self.terminate_early_flag.store(false, Ordering::SeqCst);

        let solver_scope = match self.random_seed {
            Some(seed) => SolverScope::with_seed(score_director, seed),
            None => SolverScope::new(score_director),
        };
        let mut solver_scope = solver_scope
            .with_environment_mode(self.environment_mode)
            .with_terminate_early_flag(Arc::clone(&self.terminate_early_flag));
        solver_scope.start_solving();
        solver_scope.update_best_solution();
        let starting_score = solver_scope.calculate_score();

        info!(
            event = "solve_start",
            environment_mode = ?self.environment_mode,
            random_seed = ?self.random_seed,
            phases = self.phases.len(),
            score = %starting_score,
        );

        self.run_phases(&mut solver_scope)?;

        let duration = solver_scope.elapsed().unwrap_or_default();
        let steps = solver_scope.total_step_count();
        let moves = solver_scope.move_evaluation_count();
        let speed = if duration.as_secs_f64() > 0.0 {
            (moves as f64 / duration.as_secs_f64()) as u64
        } else {
            0
        };
        let best = solver_scope.take_best_or_working_solution();
        let best_score = best.score();
        info!(
            event = "solve_end",
            duration_ms = duration.as_millis() as u64,
            steps = steps,
            moves = moves,
            speed = speed,
            score = %best_score.map(|score| score.to_string()).unwrap_or_default(),
            feasible = best_score.is_some_and(|score| score.is_feasible()),
        );
        Ok(best)
    }

    fn run_phases(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        let termination: &dyn Termination<S, D> = match &self.termination {
            Some(termination) => termination.as_ref(),
            None => &NeverTermination,
        };
        for phase in &mut self.phases {
            phase.solving_started();
        }

        let mut result = Ok(());
        for (phase_index, phase) in self.phases.iter_mut().enumerate() {
            if solver_scope.is_terminate_early() || termination.is_solver_terminated(solver_scope) {
                debug!(phase_index, "Solver terminated before the phase started");
                break;
            }
            result = phase.solve(solver_scope, termination);
            if result.is_err() {
                break;
            }
        }

        for phase in &mut self.phases {
            phase.solving_ended();
        }
        result
    }
}

//! Local search phase implementation.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use localforge_core::{PlanningSolution, Result};
use localforge_scoring::assertion::{assert_expected_working_score, assert_working_score_from_scratch};
use localforge_scoring::ScoreDirector;
use tracing::{debug, info, trace, warn};

use crate::heuristic::r#move::Move;
use crate::phase::localsearch::Decider;
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope, StepScope};
use crate::termination::{ChainedTermination, Termination};

/// Local search phase that improves an existing solution.
///
/// Every step asks the decider for a move, applies it to the working
/// solution and recalls the best solution when the score improved. The
/// phase ends when its termination or the solver termination fires, or
/// when a step finds no doable move.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `D` - The score director type
/// * `Dc` - The decider, single or multithreaded
pub struct LocalSearchPhase<S: PlanningSolution, D: ScoreDirector<S>, Dc> {
    phase_index: usize,
    decider: Dc,
    termination: Option<Box<dyn Termination<S, D>>>,
    _phantom: PhantomData<fn() -> (S, D)>,
}

impl<S, D, Dc> LocalSearchPhase<S, D, Dc>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    Dc: Decider<S, D>,
{
    pub fn new(phase_index: usize, decider: Dc) -> Self {
        Self {
            phase_index,
            decider,
            termination: None,
            _phantom: PhantomData,
        }
    }

    /// Sets a termination that only applies to this phase.
    pub fn with_termination(mut self, termination: Box<dyn Termination<S, D>>) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn decider(&self) -> &Dc {
        &self.decider
    }

    fn run_steps(
        decider: &mut Dc,
        solver_scope: &mut SolverScope<S, D>,
        phase_scope: &mut PhaseScope<S>,
        termination: &dyn Termination<S, D>,
    ) -> Result<()> {
        while !termination.is_phase_terminated(solver_scope, phase_scope) {
            let mut step_scope: StepScope<S, Dc::Move> = StepScope::new(
                phase_scope.next_step_index(),
                phase_scope.last_completed_step_score(),
                phase_scope.best_score(),
            );
            decider.step_started(solver_scope, &step_scope);
            decider.decide_next_step(solver_scope, phase_scope, &mut step_scope, termination)?;

            let Some(step) = step_scope.step().cloned() else {
                if termination.is_phase_terminated(solver_scope, phase_scope) {
                    trace!(step = step_scope.step_index(), "Step terminated before a move was picked");
                } else {
                    warn!(
                        step = step_scope.step_index(),
                        elapsed_ms = phase_scope.elapsed().as_millis() as u64,
                        "No doable selected move at step, terminating phase early"
                    );
                }
                break;
            };

            let undo = step.do_move(solver_scope.score_director_mut());
            step_scope.set_undo_step(undo);
            let score = solver_scope.calculate_score();

            let mode = solver_scope.environment_mode();
            if mode.is_fast_asserted() {
                if let Some(expected) = step_scope.score() {
                    assert_expected_working_score::<S>(expected, score, &step)?;
                }
            }
            if mode.is_full_asserted() {
                assert_working_score_from_scratch::<S, D>(solver_scope.score_director(), score, &step)?;
            }

            phase_scope.step_ended(step_scope.step_index(), score);
            solver_scope.increment_step_count();
            if solver_scope.update_best_solution() {
                debug!(
                    event = "new_best",
                    phase_index = phase_scope.phase_index(),
                    step = step_scope.step_index(),
                    score = %score,
                );
            }
            decider.step_ended(solver_scope, phase_scope, &step_scope)?;

            debug!(
                event = "step",
                step = step_scope.step_index(),
                elapsed_ms = phase_scope.elapsed().as_millis() as u64,
                score = %score,
                best_score = %phase_scope.best_score(),
                accepted = step_scope.accepted_move_count(),
                selected = step_scope.selected_move_count(),
                picked_move = ?step,
            );
        }
        Ok(())
    }
}

impl<S, D, Dc> Debug for LocalSearchPhase<S, D, Dc>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    Dc: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("phase_index", &self.phase_index)
            .field("decider", &self.decider)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<S, D, Dc> Phase<S, D> for LocalSearchPhase<S, D, Dc>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    Dc: Decider<S, D>,
{
    fn solving_started(&mut self) {
        self.decider.solving_started();
    }

    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>, solver_termination: &dyn Termination<S, D>) -> Result<()> {
        let starting_score = solver_scope.calculate_score();
        let best_score = solver_scope.best_score().copied().unwrap_or(starting_score);
        let rng = solver_scope.fork_random();
        let mut phase_scope = PhaseScope::new(self.phase_index, starting_score, best_score, rng);
        let termination = ChainedTermination::new(self.termination.as_deref(), solver_termination);

        self.decider.phase_started(solver_scope, &mut phase_scope)?;
        info!(
            event = "phase_start",
            phase = "Local Search",
            phase_index = self.phase_index,
            score = %starting_score,
        );

        let result = Self::run_steps(&mut self.decider, solver_scope, &mut phase_scope, &termination);
        let ended = self.decider.phase_ended(solver_scope, &phase_scope);

        let duration = phase_scope.elapsed();
        let moves = phase_scope.move_evaluation_count();
        let speed = if duration.as_secs_f64() > 0.0 {
            (moves as f64 / duration.as_secs_f64()) as u64
        } else {
            0
        };
        info!(
            event = "phase_end",
            phase = "Local Search",
            phase_index = self.phase_index,
            duration_ms = duration.as_millis() as u64,
            steps = phase_scope.step_count(),
            moves = moves,
            speed = speed,
            score = %phase_scope.best_score(),
        );
        result.and(ended)
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }

    fn solving_ended(&mut self) {
        self.decider.solving_ended();
    }
}

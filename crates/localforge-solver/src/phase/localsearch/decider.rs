//! Local search deciders.
//!
//! A decider runs one step's selection loop: it pulls moves from the move
//! selector, evaluates them, lets the acceptor judge them and feeds them to
//! the forager, then records the forager's pick on the step scope.

use std::fmt::Debug;

use localforge_core::{LocalForgeError, PlanningSolution, Result};
use localforge_scoring::assertion::{assert_expected_undo_score, assert_working_score_from_scratch};
use localforge_scoring::ScoreDirector;
use tracing::trace;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;
use crate::phase::localsearch::{Acceptor, LocalSearchForager};
use crate::scope::{MoveScope, PhaseScope, SolverScope, StepScope};
use crate::termination::Termination;

/// Decides the next step of a local search phase.
///
/// The phase drives every callback; `decide_next_step` leaves the picked
/// move and its score on the step scope, or leaves the step empty when no
/// doable move was found.
pub trait Decider<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    /// The move type this decider picks.
    type Move: Move<S>;

    fn solving_started(&mut self) {}

    /// Fails if the move selector never ends and the forager cannot stop it.
    fn phase_started(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        phase_scope: &mut PhaseScope<S>,
    ) -> Result<()>;

    fn step_started(&mut self, solver_scope: &SolverScope<S, D>, step_scope: &StepScope<S, Self::Move>);

    fn decide_next_step(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        phase_scope: &mut PhaseScope<S>,
        step_scope: &mut StepScope<S, Self::Move>,
        termination: &dyn Termination<S, D>,
    ) -> Result<()>;

    /// Called after the phase applied the step.
    fn step_ended(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        phase_scope: &mut PhaseScope<S>,
        step_scope: &StepScope<S, Self::Move>,
    ) -> Result<()>;

    fn phase_ended(&mut self, solver_scope: &mut SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> Result<()>;

    fn solving_ended(&mut self) {}
}

/// Fails if a never ending selector is paired with a forager that never quits.
pub(crate) fn check_never_ending<S, M, MS>(
    move_selector: &MS,
    forager: &dyn LocalSearchForager<S, M>,
) -> Result<()>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
{
    if move_selector.is_never_ending() && !forager.supports_never_ending_move_selector() {
        return Err(LocalForgeError::Config(format!(
            "The move selector ({:?}) is never ending, but the forager ({:?}) does not support it. \
             Maybe configure the forager with an accepted_count_limit.",
            move_selector, forager
        )));
    }
    Ok(())
}

/// Applies `mv`, scores it and undoes it.
///
/// Returns `None` without touching the solution if the move is not doable.
/// In the asserting environment modes the score is checked from scratch
/// and the undo is checked to restore `last_step_score`.
pub(crate) fn evaluate_move<S, D, M>(
    score_director: &mut D,
    mv: &M,
    last_step_score: S::Score,
    full_assert: bool,
    fast_assert: bool,
) -> Result<Option<S::Score>>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
{
    if !mv.is_doable(&*score_director) {
        return Ok(None);
    }
    let undo = mv.do_move(score_director);
    let score = score_director.calculate_score();
    if full_assert {
        assert_working_score_from_scratch::<S, D>(score_director, score, mv)?;
    }
    undo.apply(score_director);
    if fast_assert {
        let undo_score = score_director.calculate_score();
        assert_expected_undo_score::<S, D>(score_director, last_step_score, undo_score, &undo)?;
    }
    Ok(Some(score))
}

/// Single-threaded decider: evaluates every candidate on the solver's own
/// score director.
pub struct LocalSearchDecider<S: PlanningSolution, M: Move<S>, MS> {
    move_selector: MS,
    acceptor: Box<dyn Acceptor<S, M>>,
    forager: Box<dyn LocalSearchForager<S, M>>,
}

impl<S, M, MS> LocalSearchDecider<S, M, MS>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
{
    pub fn new(
        move_selector: MS,
        acceptor: Box<dyn Acceptor<S, M>>,
        forager: Box<dyn LocalSearchForager<S, M>>,
    ) -> Self {
        Self {
            move_selector,
            acceptor,
            forager,
        }
    }

    pub fn move_selector(&self) -> &MS {
        &self.move_selector
    }
}

impl<S: PlanningSolution, M: Move<S>, MS: Debug> Debug for LocalSearchDecider<S, M, MS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchDecider")
            .field("move_selector", &self.move_selector)
            .field("acceptor", &self.acceptor)
            .field("forager", &self.forager)
            .finish()
    }
}

impl<S, D, M, MS> Decider<S, D> for LocalSearchDecider<S, M, MS>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    MS: MoveSelector<S, M>,
{
    type Move = M;

    fn solving_started(&mut self) {
        self.move_selector.solving_started();
    }

    fn phase_started(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        phase_scope: &mut PhaseScope<S>,
    ) -> Result<()> {
        check_never_ending(&self.move_selector, self.forager.as_ref())?;
        phase_scope.set_problem_scale(self.move_selector.problem_scale(solver_scope.score_director()));
        self.move_selector.phase_started(phase_scope);
        self.acceptor.phase_started(phase_scope);
        self.forager.phase_started(phase_scope);
        Ok(())
    }

    fn step_started(&mut self, solver_scope: &SolverScope<S, D>, step_scope: &StepScope<S, M>) {
        self.move_selector.step_started(solver_scope.score_director());
        self.acceptor.step_started(step_scope);
        self.forager.step_started(step_scope);
    }

    fn decide_next_step(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        phase_scope: &mut PhaseScope<S>,
        step_scope: &mut StepScope<S, M>,
        termination: &dyn Termination<S, D>,
    ) -> Result<()> {
        let mode = solver_scope.environment_mode();
        let step_index = step_scope.step_index();
        let last_step_score = step_scope.last_step_score();
        let mut move_index = 0u64;
        let mut evaluated_count = 0u64;

        while let Some(mv) = self.move_selector.next_move(solver_scope.score_director()) {
            step_scope.increment_selected_move_count();
            let index = move_index;
            move_index += 1;

            let score = evaluate_move::<S, D, M>(
                solver_scope.score_director_mut(),
                &mv,
                last_step_score,
                mode.is_full_asserted(),
                mode.is_fast_asserted(),
            )?;

            match score {
                None => {
                    trace!(step = step_index, move_index = index, mv = ?mv, "Skipped not doable move");
                }
                Some(score) => {
                    evaluated_count += 1;
                    let mut move_scope = MoveScope::new(step_index, index, mv, score);
                    let accepted = self.acceptor.is_accepted(&move_scope, step_scope);
                    move_scope.set_accepted(accepted);
                    if accepted {
                        step_scope.increment_accepted_move_count();
                    }
                    trace!(
                        step = step_index,
                        move_index = index,
                        score = %score,
                        accepted = accepted,
                        mv = ?move_scope.get_move(),
                    );
                    self.forager.add_move(move_scope);
                    if self.forager.is_quit_early() {
                        break;
                    }
                }
            }

            if termination.is_phase_terminated(solver_scope, phase_scope) {
                break;
            }
        }

        phase_scope.add_move_evaluation_count(evaluated_count);
        solver_scope.add_move_evaluation_count(evaluated_count);

        if let Some(picked) = self.forager.pick_move(step_scope) {
            let (move_index, score) = (picked.move_index(), picked.score());
            step_scope.set_step(picked.into_move(), score, move_index);
        }
        Ok(())
    }

    fn step_ended(
        &mut self,
        _solver_scope: &mut SolverScope<S, D>,
        _phase_scope: &mut PhaseScope<S>,
        step_scope: &StepScope<S, M>,
    ) -> Result<()> {
        self.acceptor.step_ended(step_scope);
        self.forager.step_ended(step_scope);
        self.move_selector.step_ended();
        Ok(())
    }

    fn phase_ended(&mut self, _solver_scope: &mut SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> Result<()> {
        self.move_selector.phase_ended();
        self.acceptor.phase_ended(phase_scope);
        self.forager.phase_ended(phase_scope);
        Ok(())
    }

    fn solving_ended(&mut self) {
        self.move_selector.solving_ended();
    }
}

//! Decider that spreads move evaluation over a pool of move threads.

use std::fmt::{self, Debug};
use std::sync::{Arc, Barrier};
use std::thread::JoinHandle;

use crossbeam::channel::{bounded, Receiver, Sender};
use localforge_core::{LocalForgeError, PlanningSolution, Result};
use localforge_scoring::ScoreDirector;
use tracing::{debug, trace};

use super::operation::MoveThreadOperation;
use super::result_queue::OrderedResultQueue;
use super::worker::{join_all, spawn, MoveThread, SHUTDOWN_GRACE_PERIOD};
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;
use crate::phase::localsearch::decider::{check_never_ending, Decider};
use crate::phase::localsearch::{Acceptor, LocalSearchForager};
use crate::scope::{MoveScope, PhaseScope, SolverScope, StepScope};
use crate::termination::Termination;

/// The phase-scoped thread pool and its channels.
struct MoveThreadPool<S: PlanningSolution, D, M> {
    operation_sender: Sender<MoveThreadOperation<S, D, M>>,
    /// Kept to drop queued operations that are no longer needed.
    operation_receiver: Receiver<MoveThreadOperation<S, D, M>>,
    results: OrderedResultQueue<S, M>,
    handles: Vec<JoinHandle<()>>,
}

impl<S: PlanningSolution, D, M> MoveThreadPool<S, D, M> {
    fn send(&self, operation: MoveThreadOperation<S, D, M>) -> Result<()> {
        self.operation_sender
            .send(operation)
            .map_err(|_| LocalForgeError::MoveThread("every move thread stopped".to_string()))
    }

    /// Drops queued move evaluations. Queued setups and steps are put back,
    /// every thread has to take one of each.
    fn clear_operations(&self) {
        let retained: Vec<_> = self
            .operation_receiver
            .try_iter()
            .filter(|op| !matches!(op, MoveThreadOperation::MoveEvaluation { .. }))
            .collect();
        for operation in retained {
            let _ = self.operation_sender.try_send(operation);
        }
    }
}

impl<S: PlanningSolution, D, M> Drop for MoveThreadPool<S, D, M> {
    fn drop(&mut self) {
        self.clear_operations();
        for _ in 0..self.handles.len() {
            let _ = self.operation_sender.try_send(MoveThreadOperation::Destroy);
        }
        // Closes the result channel for threads blocked on sending.
        let (_, closed) = bounded(0);
        drop(std::mem::replace(&mut self.results, OrderedResultQueue::new(closed)));
        join_all(std::mem::take(&mut self.handles), SHUTDOWN_GRACE_PERIOD);
    }
}

/// Multithreaded decider.
///
/// Each move thread owns a replica of the score director. The decider keeps
/// `selected_move_buffer_size` moves in flight, consumes their evaluations
/// strictly in selection order and forages them exactly like
/// [`LocalSearchDecider`](crate::phase::localsearch::LocalSearchDecider)
/// does, so both pick the same steps for the same seed.
pub struct MultiThreadedDecider<S: PlanningSolution, D, M: Move<S>, MS> {
    move_selector: MS,
    acceptor: Box<dyn Acceptor<S, M>>,
    forager: Box<dyn LocalSearchForager<S, M>>,
    move_thread_count: usize,
    selected_move_buffer_size: usize,
    pool: Option<MoveThreadPool<S, D, M>>,
}

impl<S, D, M, MS> MultiThreadedDecider<S, D, M, MS>
where
    S: PlanningSolution,
    D: ScoreDirector<S> + 'static,
    M: Move<S>,
    MS: MoveSelector<S, M>,
{
    /// Creates a decider.
    ///
    /// # Arguments
    /// * `move_thread_count` - Number of move threads, at least 1
    /// * `selected_move_buffer_size` - Moves kept in flight, at least 1
    pub fn new(
        move_selector: MS,
        acceptor: Box<dyn Acceptor<S, M>>,
        forager: Box<dyn LocalSearchForager<S, M>>,
        move_thread_count: usize,
        selected_move_buffer_size: usize,
    ) -> Self {
        Self {
            move_selector,
            acceptor,
            forager,
            move_thread_count: move_thread_count.max(1),
            selected_move_buffer_size: selected_move_buffer_size.max(1),
            pool: None,
        }
    }

    pub fn move_thread_count(&self) -> usize {
        self.move_thread_count
    }

    pub fn selected_move_buffer_size(&self) -> usize {
        self.selected_move_buffer_size
    }

    fn start_pool(&mut self, solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> Result<()> {
        let thread_count = self.move_thread_count;
        let (operation_sender, operation_receiver) = bounded(self.selected_move_buffer_size + 2 * thread_count);
        let (result_sender, result_receiver) = bounded(self.selected_move_buffer_size + thread_count);
        let barrier = Arc::new(Barrier::new(thread_count));

        let mut pool = MoveThreadPool {
            operation_sender,
            operation_receiver,
            results: OrderedResultQueue::new(result_receiver),
            handles: Vec::with_capacity(thread_count),
        };
        for thread_index in 0..thread_count {
            let thread = MoveThread::new(
                thread_index,
                pool.operation_receiver.clone(),
                result_sender.clone(),
                Arc::clone(&barrier),
                solver_scope.environment_mode(),
            );
            pool.handles.push(spawn(thread)?);
        }
        drop(result_sender);

        for _ in 0..thread_count {
            pool.send(MoveThreadOperation::Setup {
                score_director: solver_scope.score_director().create_child_thread(),
                step_index: phase_scope.next_step_index(),
                last_step_score: phase_scope.last_completed_step_score(),
            })?;
        }
        debug!(
            move_thread_count = thread_count,
            selected_move_buffer_size = self.selected_move_buffer_size,
            "Started move threads"
        );
        self.pool = Some(pool);
        Ok(())
    }
}

impl<S: PlanningSolution, D, M: Move<S>, MS: Debug> Debug for MultiThreadedDecider<S, D, M, MS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiThreadedDecider")
            .field("move_selector", &self.move_selector)
            .field("acceptor", &self.acceptor)
            .field("forager", &self.forager)
            .field("move_thread_count", &self.move_thread_count)
            .field("selected_move_buffer_size", &self.selected_move_buffer_size)
            .field("running", &self.pool.is_some())
            .finish()
    }
}

impl<S, D, M, MS> Decider<S, D> for MultiThreadedDecider<S, D, M, MS>
where
    S: PlanningSolution,
    D: ScoreDirector<S> + 'static,
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
        self.start_pool(solver_scope, phase_scope)
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
        let pool = self
            .pool
            .as_mut()
            .ok_or_else(|| LocalForgeError::InvalidState("the move threads are not running".to_string()))?;
        let step_index = step_scope.step_index();
        let buffer_size = self.selected_move_buffer_size as u64;
        pool.results.start_next_step(step_index)?;

        let mut selected_count = 0u64;
        let mut foraged_count = 0u64;
        let mut evaluated_count = 0u64;
        let mut selector_exhausted = false;
        loop {
            while !selector_exhausted && selected_count - foraged_count < buffer_size {
                match self.move_selector.next_move(solver_scope.score_director()) {
                    Some(mv) => {
                        step_scope.increment_selected_move_count();
                        pool.send(MoveThreadOperation::MoveEvaluation {
                            step_index,
                            move_index: selected_count,
                            mv,
                        })?;
                        selected_count += 1;
                    }
                    None => selector_exhausted = true,
                }
            }
            if foraged_count == selected_count {
                break;
            }

            let evaluation = pool.results.take()?;
            foraged_count += 1;
            match evaluation.score {
                None => {
                    trace!(
                        step = step_index,
                        move_index = evaluation.move_index,
                        mv = ?evaluation.mv,
                        "Skipped not doable move"
                    );
                }
                Some(score) => {
                    evaluated_count += 1;
                    let mut move_scope = MoveScope::new(step_index, evaluation.move_index, evaluation.mv, score);
                    let accepted = self.acceptor.is_accepted(&move_scope, step_scope);
                    move_scope.set_accepted(accepted);
                    if accepted {
                        step_scope.increment_accepted_move_count();
                    }
                    trace!(
                        step = step_index,
                        move_index = move_scope.move_index(),
                        thread_index = evaluation.thread_index,
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
        pool.clear_operations();

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
        phase_scope: &mut PhaseScope<S>,
        step_scope: &StepScope<S, M>,
    ) -> Result<()> {
        self.acceptor.step_ended(step_scope);
        self.forager.step_ended(step_scope);
        self.move_selector.step_ended();

        let (Some(pool), Some(step)) = (self.pool.as_ref(), step_scope.step()) else {
            return Ok(());
        };
        pool.clear_operations();
        for _ in 0..self.move_thread_count {
            pool.send(MoveThreadOperation::ApplyStep {
                step_index: step_scope.step_index() + 1,
                step: step.clone(),
                score: phase_scope.last_completed_step_score(),
            })?;
        }
        Ok(())
    }

    fn phase_ended(&mut self, _solver_scope: &mut SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> Result<()> {
        self.move_selector.phase_ended();
        self.acceptor.phase_ended(phase_scope);
        self.forager.phase_ended(phase_scope);
        // Dropping the pool stops the threads.
        self.pool = None;
        Ok(())
    }

    fn solving_ended(&mut self) {
        self.move_selector.solving_ended();
    }
}

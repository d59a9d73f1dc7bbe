//! Move evaluation threads.

use std::any::Any;
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{Receiver, Sender};
use localforge_config::EnvironmentMode;
use localforge_core::{LocalForgeError, PlanningSolution, Result};
use localforge_scoring::assertion::assert_expected_working_score;
use localforge_scoring::ScoreDirector;
use tracing::{debug, trace, warn};

use super::operation::{MoveEvaluation, MoveThreadOperation, MoveThreadResult};
use crate::heuristic::r#move::Move;
use crate::phase::localsearch::decider::evaluate_move;

/// How long a shut down pool waits for its threads before detaching them.
pub(crate) const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// One move thread: owns a replica score director and evaluates moves
/// taken from the shared operation channel.
pub(crate) struct MoveThread<S: PlanningSolution, D, M> {
    thread_index: usize,
    operations: Receiver<MoveThreadOperation<S, D, M>>,
    results: Sender<MoveThreadResult<S, M>>,
    barrier: Arc<Barrier>,
    environment_mode: EnvironmentMode,
    score_director: Option<D>,
    step_index: u64,
    last_step_score: S::Score,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, D, M> MoveThread<S, D, M>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
{
    pub fn new(
        thread_index: usize,
        operations: Receiver<MoveThreadOperation<S, D, M>>,
        results: Sender<MoveThreadResult<S, M>>,
        barrier: Arc<Barrier>,
        environment_mode: EnvironmentMode,
    ) -> Self {
        Self {
            thread_index,
            operations,
            results,
            barrier,
            environment_mode,
            score_director: None,
            step_index: 0,
            last_step_score: S::Score::default(),
            _phantom: PhantomData,
        }
    }

    /// Runs until `Destroy` or a closed channel.
    ///
    /// A failed thread reports once and keeps draining its operations. It
    /// still meets its peers at every `ApplyStep` barrier, so none of them
    /// wait for it forever.
    pub fn run(mut self) {
        let mut failed = false;
        while let Ok(operation) = self.operations.recv() {
            let outcome = match operation {
                MoveThreadOperation::Setup {
                    score_director,
                    step_index,
                    last_step_score,
                } => {
                    self.score_director = Some(score_director);
                    self.step_index = step_index;
                    self.last_step_score = last_step_score;
                    // Every thread takes exactly one setup.
                    self.barrier.wait();
                    Ok(())
                }
                MoveThreadOperation::MoveEvaluation { .. } if failed => Ok(()),
                MoveThreadOperation::MoveEvaluation {
                    step_index,
                    move_index,
                    mv,
                } => self.evaluate(step_index, move_index, mv),
                MoveThreadOperation::ApplyStep {
                    step_index,
                    step,
                    score,
                } => {
                    // Every thread applies each step exactly once.
                    self.barrier.wait();
                    if failed {
                        Ok(())
                    } else {
                        self.apply_step(step_index, step, score)
                    }
                }
                MoveThreadOperation::Destroy => break,
            };
            if let Err(error) = outcome {
                warn!(thread_index = self.thread_index, %error, "Move thread failed");
                let _ = self.results.send(MoveThreadResult::Failed {
                    thread_index: self.thread_index,
                    error,
                });
                failed = true;
            }
        }
        trace!(thread_index = self.thread_index, "Move thread stopped");
    }

    /// A closed result channel means the pool is shutting down; the
    /// evaluation is dropped.
    fn evaluate(&mut self, step_index: u64, move_index: u64, mv: M) -> Result<()> {
        if step_index != self.step_index {
            return Err(LocalForgeError::MoveThread(format!(
                "move thread ({}) is at step ({}) but received a move of step ({})",
                self.thread_index, self.step_index, step_index
            )));
        }
        let last_step_score = self.last_step_score;
        let full_assert = self.environment_mode.is_full_asserted();
        let fast_assert = self.environment_mode.is_fast_asserted();
        let score_director = self.score_director.as_mut().ok_or_else(|| missing_setup(self.thread_index))?;
        let score = catch_unwind(AssertUnwindSafe(|| {
            evaluate_move::<S, D, M>(score_director, &mv, last_step_score, full_assert, fast_assert)
        }))
        .map_err(|payload| panicked(self.thread_index, payload))??;

        let evaluation = MoveEvaluation {
            thread_index: self.thread_index,
            step_index,
            move_index,
            mv,
            score,
        };
        let _ = self.results.send(MoveThreadResult::Evaluated(evaluation));
        Ok(())
    }

    fn apply_step(&mut self, step_index: u64, step: M, score: S::Score) -> Result<()> {
        let fast_assert = self.environment_mode.is_fast_asserted();
        let score_director = self.score_director.as_mut().ok_or_else(|| missing_setup(self.thread_index))?;
        catch_unwind(AssertUnwindSafe(|| -> Result<()> {
            step.do_move(score_director);
            let working_score = score_director.calculate_score();
            if fast_assert {
                assert_expected_working_score::<S>(score, working_score, &step)?;
            }
            Ok(())
        }))
        .map_err(|payload| panicked(self.thread_index, payload))??;
        self.step_index = step_index;
        self.last_step_score = score;
        Ok(())
    }
}

fn missing_setup(thread_index: usize) -> LocalForgeError {
    LocalForgeError::MoveThread(format!("move thread ({thread_index}) was used before its setup"))
}

fn panicked(thread_index: usize, payload: Box<dyn Any + Send>) -> LocalForgeError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    LocalForgeError::MoveThread(format!("move thread ({thread_index}) panicked: {message}"))
}

/// Spawns a named move thread.
pub(crate) fn spawn<S, D, M>(thread: MoveThread<S, D, M>) -> Result<JoinHandle<()>>
where
    S: PlanningSolution,
    D: ScoreDirector<S> + 'static,
    M: Move<S>,
{
    let name = format!("localforge-move-{}", thread.thread_index);
    thread::Builder::new()
        .name(name.clone())
        .spawn(move || thread.run())
        .map_err(|e| LocalForgeError::MoveThread(format!("failed to spawn move thread ({name}): {e}")))
}

/// Waits up to `grace_period` for every thread to finish, then detaches
/// the rest.
pub(crate) fn join_all(handles: Vec<JoinHandle<()>>, grace_period: Duration) {
    let deadline = Instant::now() + grace_period;
    while handles.iter().any(|h| !h.is_finished()) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    for handle in handles {
        let name = handle.thread().name().unwrap_or("move thread").to_string();
        if !handle.is_finished() {
            warn!(thread = %name, "Move thread did not stop within the grace period, detaching it");
            continue;
        }
        if handle.join().is_err() {
            warn!(thread = %name, "Move thread ended with a panic");
        } else {
            debug!(thread = %name, "Move thread joined");
        }
    }
}

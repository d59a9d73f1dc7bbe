//! Reordering of move evaluations that complete out of order.

use std::collections::BTreeMap;

use crossbeam::channel::{Receiver, TryRecvError};
use localforge_core::{LocalForgeError, PlanningSolution, Result};

use super::operation::{MoveEvaluation, MoveThreadResult};

/// Hands out the evaluations of the current step by increasing move index.
///
/// Results of earlier steps are dropped. A result of a later step means
/// the pipeline lost track of the step and is fatal.
pub(crate) struct OrderedResultQueue<S: PlanningSolution, M> {
    receiver: Receiver<MoveThreadResult<S, M>>,
    step_index: u64,
    next_move_index: u64,
    backlog: BTreeMap<u64, MoveEvaluation<S, M>>,
}

impl<S: PlanningSolution, M> OrderedResultQueue<S, M> {
    pub fn new(receiver: Receiver<MoveThreadResult<S, M>>) -> Self {
        Self {
            receiver,
            step_index: 0,
            next_move_index: 0,
            backlog: BTreeMap::new(),
        }
    }

    /// Switches to `step_index` and drains whatever is already queued.
    pub fn start_next_step(&mut self, step_index: u64) -> Result<()> {
        self.step_index = step_index;
        self.next_move_index = 0;
        self.backlog.clear();
        loop {
            match self.receiver.try_recv() {
                Ok(MoveThreadResult::Evaluated(evaluation)) => {
                    if evaluation.step_index > step_index {
                        return Err(step_mismatch(step_index, evaluation.step_index));
                    }
                    if evaluation.step_index == step_index {
                        self.backlog.insert(evaluation.move_index, evaluation);
                    }
                }
                Ok(MoveThreadResult::Failed { thread_index, error }) => {
                    return Err(thread_failure(thread_index, error));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }
    }

    /// Blocks until the evaluation with the next move index is available.
    pub fn take(&mut self) -> Result<MoveEvaluation<S, M>> {
        loop {
            if let Some(evaluation) = self.backlog.remove(&self.next_move_index) {
                self.next_move_index += 1;
                return Ok(evaluation);
            }
            let result = self.receiver.recv().map_err(|_| {
                LocalForgeError::MoveThread(format!(
                    "every move thread stopped while step ({}) waited for move index ({})",
                    self.step_index, self.next_move_index
                ))
            })?;
            match result {
                MoveThreadResult::Evaluated(evaluation) => {
                    if evaluation.step_index < self.step_index {
                        continue;
                    }
                    if evaluation.step_index > self.step_index {
                        return Err(step_mismatch(self.step_index, evaluation.step_index));
                    }
                    if evaluation.move_index == self.next_move_index {
                        self.next_move_index += 1;
                        return Ok(evaluation);
                    }
                    self.backlog.insert(evaluation.move_index, evaluation);
                }
                MoveThreadResult::Failed { thread_index, error } => {
                    return Err(thread_failure(thread_index, error));
                }
            }
        }
    }
}

fn step_mismatch(expected: u64, actual: u64) -> LocalForgeError {
    LocalForgeError::MoveThread(format!(
        "a move thread returned a result of step ({actual}) while the current step is ({expected})"
    ))
}

/// Keeps score corruption recognizable; wraps everything else.
fn thread_failure(thread_index: usize, error: LocalForgeError) -> LocalForgeError {
    match error {
        LocalForgeError::ScoreCorruption(message) => {
            LocalForgeError::ScoreCorruption(format!("in move thread ({thread_index}): {message}"))
        }
        LocalForgeError::MoveThread(message) => LocalForgeError::MoveThread(message),
        other => LocalForgeError::MoveThread(format!("move thread ({thread_index}) failed: {other}")),
    }
}

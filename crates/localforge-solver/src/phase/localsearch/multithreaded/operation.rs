//! Messages exchanged between the orchestrating thread and move threads.

use std::fmt;

use localforge_core::{LocalForgeError, PlanningSolution};

/// An instruction for a move thread.
pub(crate) enum MoveThreadOperation<S: PlanningSolution, D, M> {
    /// Hands a replica score director to the thread that takes it.
    Setup {
        score_director: D,
        step_index: u64,
        last_step_score: S::Score,
    },
    /// Evaluates one move against the replica.
    MoveEvaluation { step_index: u64, move_index: u64, mv: M },
    /// Applies the picked step so the replica follows the working solution.
    ///
    /// `step_index` is the index of the step that comes next.
    ApplyStep {
        step_index: u64,
        step: M,
        score: S::Score,
    },
    Destroy,
}

impl<S: PlanningSolution, D, M: fmt::Debug> fmt::Debug for MoveThreadOperation<S, D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup { step_index, .. } => f.debug_struct("Setup").field("step_index", step_index).finish(),
            Self::MoveEvaluation {
                step_index,
                move_index,
                mv,
            } => f
                .debug_struct("MoveEvaluation")
                .field("step_index", step_index)
                .field("move_index", move_index)
                .field("mv", mv)
                .finish(),
            Self::ApplyStep { step_index, step, score } => f
                .debug_struct("ApplyStep")
                .field("step_index", step_index)
                .field("step", step)
                .field("score", score)
                .finish(),
            Self::Destroy => f.write_str("Destroy"),
        }
    }
}

/// The outcome of one move evaluation.
pub(crate) struct MoveEvaluation<S: PlanningSolution, M> {
    pub thread_index: usize,
    pub step_index: u64,
    pub move_index: u64,
    pub mv: M,
    /// `None` if the move was not doable.
    pub score: Option<S::Score>,
}

impl<S: PlanningSolution, M: fmt::Debug> fmt::Debug for MoveEvaluation<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveEvaluation")
            .field("thread_index", &self.thread_index)
            .field("step_index", &self.step_index)
            .field("move_index", &self.move_index)
            .field("mv", &self.mv)
            .field("score", &self.score)
            .finish()
    }
}

/// What a move thread sends back.
pub(crate) enum MoveThreadResult<S: PlanningSolution, M> {
    Evaluated(MoveEvaluation<S, M>),
    /// The thread hit an error or a panic and stopped.
    Failed { thread_index: usize, error: LocalForgeError },
}

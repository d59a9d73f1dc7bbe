//! Multithreaded move evaluation.
//!
//! The solver thread selects moves and hands them to a pool of move
//! threads over a bounded channel. Every move thread evaluates moves on
//! its own replica of the score director and sends the scores back. The
//! solver thread consumes the results in selection order, so acceptance
//! and foraging see exactly the sequence a single-threaded step would see.
//!
//! After a step is picked every move thread applies it to its replica,
//! synchronized on a barrier so each replica applies each step once.

mod decider;
mod operation;
mod result_queue;
mod worker;

pub use decider::MultiThreadedDecider;

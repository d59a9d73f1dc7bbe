//! Local search phase.
//!
//! A step is picked by a [`Decider`]: the move selector proposes moves, the
//! [`Acceptor`] judges each evaluated move and the [`LocalSearchForager`]
//! picks the step among them. [`LocalSearchDecider`] evaluates on the
//! solver thread, [`MultiThreadedDecider`] on a pool of move threads.

pub mod acceptor;
mod decider;
mod forager;
pub mod multithreaded;
mod phase;

pub use acceptor::{
    Acceptor, CompositeAcceptor, GreatDelugeAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    SimulatedAnnealingAcceptor, StepCountingHillClimbingAcceptor, TabuAcceptor, TabuKind, TabuSize, WaterLevelIncrement,
};
pub(crate) use decider::check_never_ending;
pub use decider::{Decider, LocalSearchDecider};
pub use forager::{AcceptedForager, LocalSearchForager};
pub use multithreaded::MultiThreadedDecider;
pub use phase::LocalSearchPhase;

#[cfg(test)]
mod tests;

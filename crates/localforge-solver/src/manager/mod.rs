//! Wiring from configuration to solver components.
//!
//! The manager module provides:
//! - [`SolverFactory`]: builds a [`Solver`](crate::solver::Solver) from a `SolverConfig`
//! - [`LocalSearchPhaseFactory`]: builds one local search phase from a `LocalSearchConfig`
//! - the builders that turn acceptor, forager, move selector and
//!   termination configuration into components
//!
//! Phases are created fresh for every solver, so acceptor memory such as
//! tabu lists never leaks from one solve into the next.

mod builder;
mod phase_factory;
mod solver_factory;

#[cfg(test)]
mod phase_factory_tests;

pub use builder::{AcceptorBuilder, ForagerBuilder, MoveSelectorBuilder, TerminationBuilder, DEFAULT_TABU_SIZE};
pub use phase_factory::LocalSearchPhaseFactory;
pub use solver_factory::SolverFactory;

use localforge_config::SolverConfig;
use localforge_core::{PlanningSolution, Result};
use localforge_scoring::ScoreDirector;

use crate::phase::Phase;

/// Factory trait for creating phases at runtime.
///
/// Called once per solver so every solve starts with clean phase state.
pub trait SolverPhaseFactory<S, D>: Send + Sync
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    /// Creates a new phase instance.
    fn create_phase(&self, phase_index: usize, solver_config: &SolverConfig) -> Result<Box<dyn Phase<S, D>>>;
}

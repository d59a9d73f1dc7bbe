//! LocalForge - a local search engine for planning problems
//!
//! Implement [`PlanningSolution`] for the working solution, describe its
//! planning variable with a [`VariableAccessor`] and hand both to
//! [`run_solver`] or a [`SolverFactory`].
//!
//! # Example
//!
//! ```rust
//! use localforge::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert!(score.is_feasible());
//! assert_eq!(HardSoftScore::parse("0hard/-100soft").unwrap(), score);
//! ```

// Score types
pub use localforge_core::score::{HardSoftScore, ParseableScore, Score, ScoreParseError, SimpleScore};
pub use localforge_core::{LocalForgeError, PlanningSolution, Result};

// Score directors
pub use localforge_scoring::{
    IncrementalScoreCalculator, IncrementalScoreDirector, ScoreDirector, SimpleScoreDirector,
};

// Configuration
pub use localforge_config::{
    AcceptorConfig, AcceptorType, ConfigError, EnvironmentMode, FinalistPodiumType, ForagerConfig, LocalSearchConfig,
    LocalSearchType, MoveSelectorConfig, MoveThreadCount, PhaseConfig, PickEarlyType, SelectionOrder,
    SolverConfig, TerminationConfig,
};

// Engine
pub use localforge_solver::{
    LocalSearchPhaseFactory, Solver, SolverFactory, Termination, VariableAccessor,
};

/// The full engine API, for custom phases, acceptors and moves.
pub mod engine {
    pub use localforge_solver::*;
}

#[cfg(feature = "console")]
pub mod console {
    //! Colored console output for solver events.
    pub use localforge_console::{init, SolverConsoleLayer};
}

mod solver;
pub use solver::run_solver;

pub mod prelude {
    pub use super::{
        run_solver, EnvironmentMode, HardSoftScore, LocalForgeError, ParseableScore, PlanningSolution,
        Score, SimpleScore, SolverConfig, SolverFactory, VariableAccessor,
    };
}

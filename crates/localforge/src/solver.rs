//! Solver entry point that hides the phase and director wiring.

use std::fmt::Debug;
use std::hash::Hash;

use localforge_config::SolverConfig;
use localforge_core::{ParseableScore, PlanningSolution, Result};
use localforge_scoring::SimpleScoreDirector;
use localforge_solver::{SolverFactory, VariableAccessor};

/// Solves `solution` with full score recalculation after every move.
///
/// Runs the phases of `config`, or one late acceptance phase if it has
/// none, and returns the best solution found with its score set. With the
/// `console` feature the console output is initialized first.
///
/// # Example
///
/// ```rust
/// use localforge::prelude::*;
/// use localforge_test::nqueens::{
///     calculate_conflicts, get_queen_row, queen_count, row_range, set_queen_row, NQueensSolution,
/// };
///
/// let accessor = VariableAccessor::new(0, "row", get_queen_row, set_queen_row, queen_count, row_range);
/// let config = SolverConfig::new().with_termination_steps(20);
/// let best = run_solver(NQueensSolution::all_on_first_row(6), calculate_conflicts, accessor, config).unwrap();
/// assert_eq!(best.score(), Some(calculate_conflicts(&best)));
/// ```
///
/// # Errors
///
/// Fails on invalid configuration, on a failing move thread, or on score
/// corruption detected by an assertion environment mode.
pub fn run_solver<S, V>(
    solution: S,
    score_calculator: fn(&S) -> S::Score,
    accessor: VariableAccessor<S, V>,
    config: SolverConfig,
) -> Result<S>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    #[cfg(feature = "console")]
    localforge_console::init();

    let factory = SolverFactory::new(config, accessor);
    let mut solver = factory.build_solver::<SimpleScoreDirector<S, fn(&S) -> S::Score>>()?;
    solver.solve(SimpleScoreDirector::new(solution, score_calculator))
}

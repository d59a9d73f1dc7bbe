//! Builds solvers from a [`SolverConfig`].

use std::fmt::Debug;
use std::hash::Hash;

use localforge_config::{LocalSearchConfig, PhaseConfig, SolverConfig};
use localforge_core::{ParseableScore, PlanningSolution, Result};
use localforge_scoring::ScoreDirector;

use super::builder::TerminationBuilder;
use super::LocalSearchPhaseFactory;
use crate::heuristic::selector::VariableAccessor;
use crate::solver::Solver;

/// Builds a fresh [`Solver`] per solve from one configuration.
///
/// Without configured phases the solver runs a single default local
/// search phase.
///
/// # Example
///
/// ```
/// use localforge_config::SolverConfig;
/// use localforge_solver::heuristic::selector::VariableAccessor;
/// use localforge_solver::manager::SolverFactory;
/// use localforge_test::nqueens::{
///     calculate_conflicts, create_nqueens_director, get_queen_row, queen_count, row_range, set_queen_row,
///     NQueensDirector,
/// };
///
/// let config = SolverConfig::from_toml_str(r#"
///     random_seed = 3
///
///     [termination]
///     step_count_limit = 50
///
///     [[phases]]
///     type = "local_search"
///     local_search_type = "late_acceptance"
/// "#).unwrap();
/// let accessor = VariableAccessor::new(0, "row", get_queen_row, set_queen_row, queen_count, row_range);
/// let factory = SolverFactory::new(config, accessor);
///
/// let mut solver = factory.build_solver::<NQueensDirector>().unwrap();
/// let best = solver.solve(create_nqueens_director(&[0, 0, 0, 0, 0])).unwrap();
/// assert_eq!(best.score, Some(calculate_conflicts(&best)));
/// ```
pub struct SolverFactory<S: PlanningSolution, V> {
    config: SolverConfig,
    accessor: VariableAccessor<S, V>,
}

impl<S: PlanningSolution, V> Debug for SolverFactory<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverFactory")
            .field("config", &self.config)
            .field("accessor", &self.accessor)
            .finish()
    }
}

impl<S, V> SolverFactory<S, V>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    pub fn new(config: SolverConfig, accessor: VariableAccessor<S, V>) -> Self {
        Self { config, accessor }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds a solver with fresh phases.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid phase or termination setting.
    pub fn build_solver<D>(&self) -> Result<Solver<S, D>>
    where
        D: ScoreDirector<S> + 'static,
    {
        let phase_configs = if self.config.phases.is_empty() {
            vec![PhaseConfig::LocalSearch(LocalSearchConfig::default())]
        } else {
            self.config.phases.clone()
        };

        let mut phases = Vec::with_capacity(phase_configs.len());
        for (phase_index, PhaseConfig::LocalSearch(phase_config)) in phase_configs.into_iter().enumerate() {
            let factory = LocalSearchPhaseFactory::new(phase_config, self.accessor);
            phases.push(factory.build_phase::<D>(phase_index, &self.config)?);
        }

        let mut solver = Solver::new(phases).with_environment_mode(self.config.environment_mode);
        if let Some(seed) = self.config.effective_random_seed() {
            solver = solver.with_random_seed(seed);
        }
        if let Some(termination) = &self.config.termination {
            if let Some(termination) = TerminationBuilder::build::<S, D>(termination)? {
                solver = solver.with_termination(termination);
            }
        }
        Ok(solver)
    }
}

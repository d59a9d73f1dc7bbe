//! Local search phase factory.

use std::fmt::Debug;
use std::hash::Hash;

use localforge_config::{
    AcceptorConfig, AcceptorType, ForagerConfig, LocalSearchConfig, LocalSearchType, PickEarlyType, SelectionOrder,
    SolverConfig,
};
use localforge_core::{LocalForgeError, ParseableScore, PlanningSolution, Result};
use localforge_scoring::ScoreDirector;
use tracing::debug;

use super::builder::{AcceptorBuilder, ForagerBuilder, MoveSelectorBuilder, TerminationBuilder};
use super::SolverPhaseFactory;
use crate::heuristic::r#move::EitherMove;
use crate::heuristic::selector::VariableAccessor;
use crate::phase::localsearch::{
    check_never_ending, Decider, LocalSearchDecider, LocalSearchForager, LocalSearchPhase, MultiThreadedDecider,
};
use crate::phase::Phase;
use crate::termination::Termination;

/// Accepted count limit of the tabu search preset, a slow stepping algorithm.
const TABU_SEARCH_ACCEPTED_COUNT_LIMIT: usize = 1000;

/// Builds local search phases from a [`LocalSearchConfig`].
///
/// The phase moves one planning variable, reached through `accessor`.
/// Without a `local_search_type`, `acceptor` or `forager` the phase runs
/// late acceptance. With a configured `move_thread_count` the phase uses
/// the [`MultiThreadedDecider`].
///
/// # Example
///
/// ```
/// use localforge_config::{LocalSearchConfig, LocalSearchType, SolverConfig};
/// use localforge_solver::heuristic::selector::VariableAccessor;
/// use localforge_solver::manager::LocalSearchPhaseFactory;
/// use localforge_solver::phase::Phase;
/// use localforge_test::nqueens::{
///     get_queen_row, queen_count, row_range, set_queen_row, NQueensDirector, NQueensSolution,
/// };
///
/// let accessor: VariableAccessor<NQueensSolution, i64> =
///     VariableAccessor::new(0, "row", get_queen_row, set_queen_row, queen_count, row_range);
/// let config = LocalSearchConfig::default().with_local_search_type(LocalSearchType::TabuSearch);
/// let factory = LocalSearchPhaseFactory::new(config, accessor);
///
/// let phase = factory.build_phase::<NQueensDirector>(0, &SolverConfig::new()).unwrap();
/// assert_eq!(phase.phase_type_name(), "LocalSearch");
/// ```
pub struct LocalSearchPhaseFactory<S: PlanningSolution, V> {
    config: LocalSearchConfig,
    accessor: VariableAccessor<S, V>,
}

impl<S: PlanningSolution, V> Debug for LocalSearchPhaseFactory<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchPhaseFactory")
            .field("config", &self.config)
            .field("accessor", &self.accessor)
            .finish()
    }
}

impl<S, V> LocalSearchPhaseFactory<S, V>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    pub fn new(config: LocalSearchConfig, accessor: VariableAccessor<S, V>) -> Self {
        Self { config, accessor }
    }

    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Builds a fresh phase.
    ///
    /// # Errors
    ///
    /// Fails on any invalid setting: a `local_search_type` combined with an
    /// explicit acceptor or forager, an acceptor without type, an
    /// unparsable score, a never ending selector with an unbounded forager,
    /// or an invalid move thread setting in `solver_config`.
    pub fn build_phase<D>(&self, phase_index: usize, solver_config: &SolverConfig) -> Result<Box<dyn Phase<S, D>>>
    where
        D: ScoreDirector<S> + 'static,
    {
        let acceptor = AcceptorBuilder::build::<S, EitherMove<S, V>>(&self.acceptor_config()?)?;
        let forager: Box<dyn LocalSearchForager<S, EitherMove<S, V>>> =
            Box::new(ForagerBuilder::build::<S, EitherMove<S, V>>(&self.forager_config()?)?);
        let move_selector =
            MoveSelectorBuilder::build(self.config.move_selector.as_ref(), self.accessor, self.selection_order())?;
        check_never_ending(&move_selector, forager.as_ref())?;

        let termination = match &self.config.termination {
            Some(termination) => TerminationBuilder::build::<S, D>(termination)?,
            None => None,
        };

        match solver_config.move_thread_count.resolve()? {
            None => {
                debug!(phase_index, ?acceptor, ?forager, "Built local search phase");
                let decider = LocalSearchDecider::new(move_selector, acceptor, forager);
                Ok(into_phase(phase_index, decider, termination))
            }
            Some(move_thread_count) => {
                let buffer_size = move_thread_count * solver_config.resolved_move_thread_buffer_size()?;
                debug!(
                    phase_index,
                    move_thread_count,
                    selected_move_buffer_size = buffer_size,
                    ?acceptor,
                    ?forager,
                    "Built multithreaded local search phase"
                );
                let decider =
                    MultiThreadedDecider::new(move_selector, acceptor, forager, move_thread_count, buffer_size);
                Ok(into_phase(phase_index, decider, termination))
            }
        }
    }

    fn local_search_type(&self) -> LocalSearchType {
        self.config.local_search_type.unwrap_or_default()
    }

    fn conflicting_type(&self, part: &str) -> Option<LocalForgeError> {
        self.config.local_search_type.map(|local_search_type| {
            LocalForgeError::Config(format!(
                "The local_search_type ({local_search_type:?}) must not be configured \
                 if the {part} is explicitly configured."
            ))
        })
    }

    fn acceptor_config(&self) -> Result<AcceptorConfig> {
        if let Some(acceptor) = &self.config.acceptor {
            return match self.conflicting_type("acceptor") {
                Some(err) => Err(err),
                None => Ok(acceptor.clone()),
            };
        }
        let acceptor_type = match self.local_search_type() {
            LocalSearchType::HillClimbing | LocalSearchType::VariableNeighborhoodDescent => {
                AcceptorType::HillClimbing
            }
            LocalSearchType::TabuSearch => AcceptorType::EntityTabu,
            LocalSearchType::SimulatedAnnealing => AcceptorType::SimulatedAnnealing,
            LocalSearchType::LateAcceptance => AcceptorType::LateAcceptance,
            LocalSearchType::GreatDeluge => AcceptorType::GreatDeluge,
        };
        Ok(AcceptorConfig::of_type(acceptor_type))
    }

    fn forager_config(&self) -> Result<ForagerConfig> {
        if let Some(forager) = &self.config.forager {
            return match self.conflicting_type("forager") {
                Some(err) => Err(err),
                None => Ok(forager.clone()),
            };
        }
        let forager = ForagerConfig::default();
        Ok(match self.local_search_type() {
            LocalSearchType::TabuSearch => forager.with_accepted_count_limit(TABU_SEARCH_ACCEPTED_COUNT_LIMIT),
            LocalSearchType::HillClimbing
            | LocalSearchType::SimulatedAnnealing
            | LocalSearchType::LateAcceptance
            | LocalSearchType::GreatDeluge => forager.with_accepted_count_limit(1),
            LocalSearchType::VariableNeighborhoodDescent => {
                forager.with_pick_early_type(PickEarlyType::FirstLastStepScoreImproving)
            }
        })
    }

    fn selection_order(&self) -> SelectionOrder {
        match self.config.local_search_type {
            Some(LocalSearchType::VariableNeighborhoodDescent) => SelectionOrder::Original,
            _ => SelectionOrder::Random,
        }
    }
}

fn into_phase<S, D, Dc>(
    phase_index: usize,
    decider: Dc,
    termination: Option<Box<dyn Termination<S, D>>>,
) -> Box<dyn Phase<S, D>>
where
    S: PlanningSolution,
    D: ScoreDirector<S> + 'static,
    Dc: Decider<S, D> + 'static,
{
    let phase = LocalSearchPhase::new(phase_index, decider);
    match termination {
        Some(termination) => Box::new(phase.with_termination(termination)),
        None => Box::new(phase),
    }
}

impl<S, V, D> SolverPhaseFactory<S, D> for LocalSearchPhaseFactory<S, V>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
    D: ScoreDirector<S> + 'static,
{
    fn create_phase(&self, phase_index: usize, solver_config: &SolverConfig) -> Result<Box<dyn Phase<S, D>>> {
        self.build_phase(phase_index, solver_config)
    }
}

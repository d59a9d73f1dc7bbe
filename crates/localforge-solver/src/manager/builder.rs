//! Builders that wire configuration types to solver components.

use std::fmt::Debug;
use std::hash::Hash;

use localforge_config::{
    AcceptorConfig, AcceptorType, ForagerConfig, MoveSelectorConfig, SelectionOrder, TerminationConfig,
};
use localforge_core::{LocalForgeError, ParseableScore, PlanningSolution, Result, Score};
use localforge_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::{
    ChangeMoveSelector, EitherMoveSelector, SwapMoveSelector, UnionMoveSelector, VariableAccessor,
};
use crate::phase::localsearch::acceptor::{
    DEFAULT_DECAY_RATE, DEFAULT_LATE_ACCEPTANCE_SIZE, DEFAULT_STEP_COUNTING_HILL_CLIMBING_SIZE,
    DEFAULT_WATER_LEVEL_INCREMENT_RATIO,
};
use crate::phase::localsearch::{
    AcceptedForager, Acceptor, CompositeAcceptor, GreatDelugeAcceptor, HillClimbingAcceptor,
    LateAcceptanceAcceptor, SimulatedAnnealingAcceptor, StepCountingHillClimbingAcceptor, TabuAcceptor, TabuKind,
    TabuSize, WaterLevelIncrement,
};
use crate::termination::{
    BestScoreFeasibleTermination, BestScoreTermination, OrTermination, StepCountTermination, Termination,
    TimeTermination, UnimprovedStepCountTermination, UnimprovedTimeTermination,
};

/// Tabu size used when a tabu acceptor is listed without a size.
pub const DEFAULT_TABU_SIZE: usize = 7;

fn invalid(message: impl Into<String>) -> LocalForgeError {
    LocalForgeError::Config(message.into())
}

/// Parses a configured score, naming the property on failure.
pub(crate) fn parse_score<Sc: ParseableScore>(property: &str, text: &str) -> Result<Sc> {
    Sc::parse(text).map_err(|e| invalid(format!("The {property} ({text}) is not a valid score: {}", e.message)))
}

fn at_least_one(property: &str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(invalid(format!("The {property} ({value}) must be at least 1.")));
    }
    Ok(value)
}

/// Sizing properties of one tabu kind. Ratios only exist for entity and
/// value tabu.
struct TabuProperties {
    kind: TabuKind,
    acceptor_type: AcceptorType,
    name: &'static str,
    size: Option<usize>,
    ratio: Option<f64>,
    fading_size: Option<usize>,
    fading_ratio: Option<f64>,
}

impl TabuProperties {
    fn all(config: &AcceptorConfig) -> [TabuProperties; 4] {
        [
            TabuProperties {
                kind: TabuKind::Entity,
                acceptor_type: AcceptorType::EntityTabu,
                name: "entity_tabu",
                size: config.entity_tabu_size,
                ratio: config.entity_tabu_ratio,
                fading_size: config.fading_entity_tabu_size,
                fading_ratio: config.fading_entity_tabu_ratio,
            },
            TabuProperties {
                kind: TabuKind::Value,
                acceptor_type: AcceptorType::ValueTabu,
                name: "value_tabu",
                size: config.value_tabu_size,
                ratio: config.value_tabu_ratio,
                fading_size: config.fading_value_tabu_size,
                fading_ratio: config.fading_value_tabu_ratio,
            },
            TabuProperties {
                kind: TabuKind::Move,
                acceptor_type: AcceptorType::MoveTabu,
                name: "move_tabu",
                size: config.move_tabu_size,
                ratio: None,
                fading_size: config.fading_move_tabu_size,
                fading_ratio: None,
            },
            TabuProperties {
                kind: TabuKind::UndoMove,
                acceptor_type: AcceptorType::UndoMoveTabu,
                name: "undo_move_tabu",
                size: config.undo_move_tabu_size,
                ratio: None,
                fading_size: config.fading_undo_move_tabu_size,
                fading_ratio: None,
            },
        ]
    }

    fn is_enabled(&self, config: &AcceptorConfig) -> bool {
        config.has_type(self.acceptor_type)
            || self.size.is_some()
            || self.ratio.is_some()
            || self.fading_size.is_some()
            || self.fading_ratio.is_some()
    }

    fn ratio_size(&self, property: &str, ratio: f64) -> Result<TabuSize> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(invalid(format!("The {property} ({ratio}) must be in (0, 1).")));
        }
        Ok(match self.kind {
            TabuKind::Value => TabuSize::ValueRatio(ratio),
            _ => TabuSize::EntityRatio(ratio),
        })
    }

    /// Resolves `(tabu size, fading tabu size)`. A kind configured only
    /// with a fading size has no strict tabu window.
    fn sizes(&self) -> Result<(TabuSize, TabuSize)> {
        let name = self.name;
        let fading = match (self.fading_size, self.fading_ratio) {
            (Some(size), Some(ratio)) => {
                return Err(invalid(format!(
                    "The acceptor cannot have both a fading_{name}_size ({size}) and a fading_{name}_ratio ({ratio})."
                )))
            }
            (Some(size), None) => Some(TabuSize::Fixed(at_least_one(&format!("fading_{name}_size"), size)?)),
            (None, Some(ratio)) => Some(self.ratio_size(&format!("fading_{name}_ratio"), ratio)?),
            (None, None) => None,
        };
        let size = match (self.size, self.ratio) {
            (Some(size), Some(ratio)) => {
                return Err(invalid(format!(
                    "The acceptor cannot have both a {name}_size ({size}) and a {name}_ratio ({ratio})."
                )))
            }
            (Some(size), None) => TabuSize::Fixed(at_least_one(&format!("{name}_size"), size)?),
            (None, Some(ratio)) => self.ratio_size(&format!("{name}_ratio"), ratio)?,
            (None, None) if fading.is_some() => TabuSize::Fixed(0),
            (None, None) => TabuSize::Fixed(DEFAULT_TABU_SIZE),
        };
        Ok((size, fading.unwrap_or(TabuSize::Fixed(0))))
    }
}

/// Builder for constructing acceptors from configuration.
pub struct AcceptorBuilder;

impl AcceptorBuilder {
    /// Builds the acceptors enabled in `config`.
    ///
    /// An acceptor is enabled by listing its type or by setting one of its
    /// properties. Several enabled acceptors are combined into a
    /// [`CompositeAcceptor`].
    pub fn build<S, M>(config: &AcceptorConfig) -> Result<Box<dyn Acceptor<S, M>>>
    where
        S: PlanningSolution,
        S::Score: ParseableScore,
        M: Move<S>,
    {
        let mut acceptors: Vec<Box<dyn Acceptor<S, M>>> = Vec::new();

        if config.has_type(AcceptorType::HillClimbing) {
            acceptors.push(Box::new(HillClimbingAcceptor::new()));
        }

        if config.has_type(AcceptorType::StepCountingHillClimbing)
            || config.step_counting_hill_climbing_size.is_some()
            || config.step_counting_hill_climbing_type.is_some()
        {
            let size = at_least_one(
                "step_counting_hill_climbing_size",
                config
                    .step_counting_hill_climbing_size
                    .unwrap_or(DEFAULT_STEP_COUNTING_HILL_CLIMBING_SIZE),
            )?;
            let counting_type = config.step_counting_hill_climbing_type.unwrap_or_default();
            acceptors.push(Box::new(StepCountingHillClimbingAcceptor::<S>::new(size, counting_type)));
        }

        let aspiration_enabled = config.aspiration_enabled.unwrap_or(true);
        for tabu in TabuProperties::all(config) {
            if tabu.is_enabled(config) {
                let (size, fading_size) = tabu.sizes()?;
                acceptors.push(Box::new(
                    TabuAcceptor::<S, M>::sized(tabu.kind, size)
                        .with_fading_tabu_size(fading_size)
                        .with_aspiration(aspiration_enabled),
                ));
            }
        }

        if config.has_type(AcceptorType::SimulatedAnnealing)
            || config.simulated_annealing_starting_temperature.is_some()
        {
            acceptors.push(Box::new(Self::simulated_annealing::<S>(config)?));
        }

        if config.has_type(AcceptorType::LateAcceptance)
            || config.late_acceptance_size.is_some()
            || config.late_acceptance_hill_climbing.is_some()
        {
            let size = at_least_one(
                "late_acceptance_size",
                config.late_acceptance_size.unwrap_or(DEFAULT_LATE_ACCEPTANCE_SIZE),
            )?;
            acceptors.push(Box::new(
                LateAcceptanceAcceptor::<S>::new(size)
                    .with_hill_climbing(config.late_acceptance_hill_climbing.unwrap_or(true)),
            ));
        }

        if config.has_type(AcceptorType::GreatDeluge)
            || config.great_deluge_water_level_increment_score.is_some()
            || config.great_deluge_water_level_increment_ratio.is_some()
        {
            acceptors.push(Box::new(Self::great_deluge::<S>(config)?));
        }

        match acceptors.len() {
            0 => Err(invalid(format!(
                "The acceptor ({config:?}) does not enable any acceptor. \
                 Maybe list one in acceptor_types."
            ))),
            1 => Ok(acceptors.remove(0)),
            _ => Ok(Box::new(CompositeAcceptor::new(acceptors))),
        }
    }

    fn simulated_annealing<S>(config: &AcceptorConfig) -> Result<SimulatedAnnealingAcceptor<S>>
    where
        S: PlanningSolution,
        S::Score: ParseableScore,
    {
        let text = config
            .simulated_annealing_starting_temperature
            .as_deref()
            .ok_or_else(|| {
                invalid(
                    "The acceptor type simulated_annealing requires a \
                     simulated_annealing_starting_temperature.",
                )
            })?;
        let temperature: S::Score = parse_score("simulated_annealing_starting_temperature", text)?;
        if temperature.to_level_numbers().iter().any(|level| *level < 0) {
            return Err(invalid(format!(
                "The simulated_annealing_starting_temperature ({text}) must not have a negative level."
            )));
        }
        let decay_rate = config.simulated_annealing_decay_rate.unwrap_or(DEFAULT_DECAY_RATE);
        if !(decay_rate > 0.0 && decay_rate <= 1.0) {
            return Err(invalid(format!(
                "The simulated_annealing_decay_rate ({decay_rate}) must be in (0, 1]."
            )));
        }
        Ok(SimulatedAnnealingAcceptor::new(temperature, decay_rate))
    }

    fn great_deluge<S>(config: &AcceptorConfig) -> Result<GreatDelugeAcceptor<S>>
    where
        S: PlanningSolution,
        S::Score: ParseableScore,
    {
        let increment = match (
            config.great_deluge_water_level_increment_score.as_deref(),
            config.great_deluge_water_level_increment_ratio,
        ) {
            (Some(score), Some(ratio)) => {
                return Err(invalid(format!(
                    "The acceptor cannot have both a great_deluge_water_level_increment_score ({score}) \
                     and a great_deluge_water_level_increment_ratio ({ratio})."
                )))
            }
            (Some(score), None) => {
                WaterLevelIncrement::Score(parse_score("great_deluge_water_level_increment_score", score)?)
            }
            (None, Some(ratio)) if ratio <= 0.0 => {
                return Err(invalid(format!(
                    "The great_deluge_water_level_increment_ratio ({ratio}) must be positive."
                )))
            }
            (None, Some(ratio)) => WaterLevelIncrement::Ratio(ratio),
            (None, None) => WaterLevelIncrement::Ratio(DEFAULT_WATER_LEVEL_INCREMENT_RATIO),
        };
        Ok(GreatDelugeAcceptor::new(increment))
    }
}

/// Builder for constructing foragers from configuration.
pub struct ForagerBuilder;

impl ForagerBuilder {
    pub fn build<S: PlanningSolution, M: Move<S>>(config: &ForagerConfig) -> Result<AcceptedForager<S, M>> {
        let limit = config
            .accepted_count_limit
            .map(|limit| at_least_one("accepted_count_limit", limit))
            .transpose()?;
        Ok(AcceptedForager::new(
            config.pick_early_type.unwrap_or_default(),
            limit,
            config.break_tie_randomly.unwrap_or(true),
        )
        .with_finalist_podium_type(config.finalist_podium_type.unwrap_or_default()))
    }
}

/// Builder for constructing move selectors from configuration.
pub struct MoveSelectorBuilder;

impl MoveSelectorBuilder {
    /// Builds the selector for one planning variable.
    ///
    /// Without a configuration this is a union of change and swap moves.
    /// A selector without its own `selection_order` inherits
    /// `default_order`, union children inherit the union's order.
    pub fn build<S, V>(
        config: Option<&MoveSelectorConfig>,
        accessor: VariableAccessor<S, V>,
        default_order: SelectionOrder,
    ) -> Result<EitherMoveSelector<S, V>>
    where
        S: PlanningSolution,
        V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
    {
        let selector = match config {
            None => EitherMoveSelector::Union(UnionMoveSelector::new(
                vec![
                    EitherMoveSelector::Change(ChangeMoveSelector::new(accessor, default_order)),
                    EitherMoveSelector::Swap(SwapMoveSelector::new(accessor, default_order)),
                ],
                default_order,
            )),
            Some(MoveSelectorConfig::ChangeMoveSelector(change)) => EitherMoveSelector::Change(
                ChangeMoveSelector::new(accessor, change.selection_order.unwrap_or(default_order)),
            ),
            Some(MoveSelectorConfig::SwapMoveSelector(swap)) => EitherMoveSelector::Swap(SwapMoveSelector::new(
                accessor,
                swap.selection_order.unwrap_or(default_order),
            )),
            Some(MoveSelectorConfig::UnionMoveSelector(union)) => {
                if union.selectors.is_empty() {
                    return Err(invalid("The union_move_selector must have at least one child selector."));
                }
                let order = union.selection_order.unwrap_or(default_order);
                let children = union
                    .selectors
                    .iter()
                    .map(|child| Self::build(Some(child), accessor, order))
                    .collect::<Result<Vec<_>>>()?;
                EitherMoveSelector::Union(UnionMoveSelector::new(children, order))
            }
        };
        Ok(selector)
    }
}

/// Builder for constructing terminations from configuration.
pub struct TerminationBuilder;

impl TerminationBuilder {
    /// Builds the limits set in `config`, combined with Or.
    ///
    /// Returns `None` if no limit is set.
    pub fn build<S, D>(config: &TerminationConfig) -> Result<Option<Box<dyn Termination<S, D>>>>
    where
        S: PlanningSolution,
        S::Score: ParseableScore,
        D: ScoreDirector<S> + 'static,
    {
        let mut terminations: Vec<Box<dyn Termination<S, D>>> = Vec::new();
        if let Some(limit) = config.time_limit() {
            terminations.push(Box::new(TimeTermination::new(limit)));
        }
        if let Some(text) = config.best_score_limit.as_deref() {
            let target: S::Score = parse_score("best_score_limit", text)?;
            terminations.push(Box::new(BestScoreTermination::new(target)));
        }
        if config.best_score_feasible == Some(true) {
            terminations.push(Box::new(BestScoreFeasibleTermination::new()));
        }
        if let Some(limit) = config.step_count_limit {
            terminations.push(Box::new(StepCountTermination::new(limit)));
        }
        if let Some(limit) = config.unimproved_step_count_limit {
            terminations.push(Box::new(UnimprovedStepCountTermination::new(limit)));
        }
        if let Some(limit) = config.unimproved_time_limit() {
            terminations.push(Box::new(UnimprovedTimeTermination::new(limit)));
        }

        Ok(match terminations.len() {
            0 => None,
            1 => Some(terminations.remove(0)),
            _ => Some(Box::new(OrTermination::new(terminations))),
        })
    }
}

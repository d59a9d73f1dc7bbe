//! Configuration system for LocalForge.
//!
//! Load solver configuration from TOML or YAML to control termination,
//! move threads and local search phases without code changes.
//!
//! # Examples
//!
//! ```
//! use localforge_config::{LocalSearchType, PhaseConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [[phases]]
//!     type = "local_search"
//!     local_search_type = "tabu_search"
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! let PhaseConfig::LocalSearch(phase) = &config.phases[0];
//! assert_eq!(phase.local_search_type, Some(LocalSearchType::TabuSearch));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use localforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use localforge_core::LocalForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for LocalForgeError {
    fn from(err: ConfigError) -> Self {
        LocalForgeError::Config(err.to_string())
    }
}

/// Default number of moves kept in flight per move thread.
pub const DEFAULT_MOVE_THREAD_BUFFER_SIZE: usize = 10;

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of threads for parallel move evaluation.
    #[serde(default)]
    pub move_thread_count: MoveThreadCount,

    /// Moves selected ahead per move thread.
    #[serde(default)]
    pub move_thread_buffer_size: Option<usize>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Phase configurations.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination step limit.
    pub fn with_termination_steps(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the move thread count.
    pub fn with_move_thread_count(mut self, count: MoveThreadCount) -> Self {
        self.move_thread_count = count;
        self
    }

    /// Adds a phase configuration.
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the seed for the solver random.
    ///
    /// Reproducible modes fall back to seed 0; the non-reproducible mode
    /// returns `None` so the caller seeds from the operating system.
    pub fn effective_random_seed(&self) -> Option<u64> {
        match self.random_seed {
            Some(seed) => Some(seed),
            None if self.environment_mode.is_reproducible() => Some(0),
            None => None,
        }
    }

    /// Returns the per-thread move buffer size, validated.
    pub fn resolved_move_thread_buffer_size(&self) -> Result<usize, ConfigError> {
        match self.move_thread_buffer_size {
            Some(0) => Err(ConfigError::Invalid(
                "move_thread_buffer_size (0) must be at least 1".to_string(),
            )),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_MOVE_THREAD_BUFFER_SIZE),
        }
    }
}

/// Environment mode affecting reproducibility and assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeds the solver random from the operating system.
    NonReproducible,

    /// Deterministic behavior for a fixed seed.
    #[default]
    Reproducible,

    /// Reproducible, plus cheap score assertions after undo and step.
    FastAssert,

    /// Fast assert, plus recomputing the score from scratch after every move.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_reproducible(&self) -> bool {
        !matches!(self, EnvironmentMode::NonReproducible)
    }

    /// True for the modes that check undo and step scores.
    pub fn is_fast_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }

    /// True for the mode that recomputes scores from scratch.
    pub fn is_full_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Move thread count configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveThreadCount {
    /// Derive the thread count from the available processors.
    Auto,

    /// No parallel move evaluation.
    #[default]
    None,

    /// Specific number of threads.
    Count(usize),
}

impl MoveThreadCount {
    /// Resolves to a worker count, or `None` for single-threaded solving.
    ///
    /// `Auto` leaves two processors for the solver thread and the system
    /// and uses at most four move threads.
    pub fn resolve(&self) -> Result<Option<usize>, ConfigError> {
        match self {
            MoveThreadCount::None => Ok(None),
            MoveThreadCount::Count(0) => Err(ConfigError::Invalid(
                "move_thread_count (0) must be at least 1, use \"none\" to disable move threads"
                    .to_string(),
            )),
            MoveThreadCount::Count(count) => Ok(Some(*count)),
            MoveThreadCount::Auto => {
                let available = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1);
                let count = available.saturating_sub(2).min(4);
                Ok(if count >= 1 { Some(count) } else { None })
            }
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum milliseconds to spend solving.
    pub millis_spent_limit: Option<u64>,

    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Target best score to achieve (as string, e.g., "0hard/0soft").
    pub best_score_limit: Option<String>,

    /// Stop as soon as the best solution is feasible.
    pub best_score_feasible: Option<bool>,

    /// Maximum number of steps.
    pub step_count_limit: Option<u64>,

    /// Maximum unimproved steps before terminating.
    pub unimproved_step_count_limit: Option<u64>,

    /// Maximum seconds without improvement.
    pub unimproved_seconds_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.millis_spent_limit.unwrap_or(0)
            + self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.minutes_spent_limit.unwrap_or(0) * 60_000;
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    /// Returns the unimproved time limit as a Duration, if any.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.unimproved_seconds_spent_limit.map(Duration::from_secs)
    }

    /// Returns true if no limit at all is configured.
    pub fn is_empty(&self) -> bool {
        self.time_limit().is_none()
            && self.best_score_limit.is_none()
            && self.best_score_feasible != Some(true)
            && self.step_count_limit.is_none()
            && self.unimproved_step_count_limit.is_none()
            && self.unimproved_seconds_spent_limit.is_none()
    }
}

/// Phase configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Local search phase.
    LocalSearch(LocalSearchConfig),
}

/// Local search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Preset combining an acceptor and a forager.
    ///
    /// Must not be combined with an explicit `acceptor` or `forager`.
    pub local_search_type: Option<LocalSearchType>,

    /// Acceptor configuration.
    pub acceptor: Option<AcceptorConfig>,

    /// Forager configuration.
    pub forager: Option<ForagerConfig>,

    /// Move selector configuration.
    pub move_selector: Option<MoveSelectorConfig>,

    /// Phase termination configuration.
    pub termination: Option<TerminationConfig>,
}

impl LocalSearchConfig {
    pub fn with_local_search_type(mut self, local_search_type: LocalSearchType) -> Self {
        self.local_search_type = Some(local_search_type);
        self
    }

    pub fn with_acceptor(mut self, acceptor: AcceptorConfig) -> Self {
        self.acceptor = Some(acceptor);
        self
    }

    pub fn with_forager(mut self, forager: ForagerConfig) -> Self {
        self.forager = Some(forager);
        self
    }

    pub fn with_move_selector(mut self, move_selector: MoveSelectorConfig) -> Self {
        self.move_selector = Some(move_selector);
        self
    }

    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = Some(termination);
        self
    }
}

/// Local search presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalSearchType {
    HillClimbing,
    TabuSearch,
    SimulatedAnnealing,
    #[default]
    LateAcceptance,
    GreatDeluge,
    VariableNeighborhoodDescent,
}

/// Acceptor types that can be listed in [`AcceptorConfig::acceptor_types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptorType {
    HillClimbing,
    StepCountingHillClimbing,
    EntityTabu,
    ValueTabu,
    MoveTabu,
    UndoMoveTabu,
    SimulatedAnnealing,
    LateAcceptance,
    GreatDeluge,
}

/// Acceptor configuration.
///
/// Each acceptor is enabled by listing its type or by setting one of its
/// properties. Enabling several acceptors combines them: a move must be
/// accepted by all of them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AcceptorConfig {
    #[serde(default)]
    pub acceptor_types: Vec<AcceptorType>,

    pub entity_tabu_size: Option<usize>,
    /// Entity tabu size as a ratio of the entity count, in (0, 1).
    pub entity_tabu_ratio: Option<f64>,
    pub fading_entity_tabu_size: Option<usize>,
    pub fading_entity_tabu_ratio: Option<f64>,

    pub value_tabu_size: Option<usize>,
    /// Value tabu size as a ratio of the value range size, in (0, 1).
    pub value_tabu_ratio: Option<f64>,
    pub fading_value_tabu_size: Option<usize>,
    pub fading_value_tabu_ratio: Option<f64>,

    pub move_tabu_size: Option<usize>,
    pub fading_move_tabu_size: Option<usize>,

    pub undo_move_tabu_size: Option<usize>,
    pub fading_undo_move_tabu_size: Option<usize>,

    /// Accept a tabu move if it improves the best score. Defaults to true.
    pub aspiration_enabled: Option<bool>,

    /// Starting temperature written as a score, e.g. "2hard/100soft".
    pub simulated_annealing_starting_temperature: Option<String>,

    /// Temperature multiplier applied after every step.
    pub simulated_annealing_decay_rate: Option<f64>,

    pub late_acceptance_size: Option<usize>,

    /// Also accept moves that do not worsen the last step score. Defaults to true.
    pub late_acceptance_hill_climbing: Option<bool>,

    pub step_counting_hill_climbing_size: Option<usize>,
    pub step_counting_hill_climbing_type: Option<StepCountingHillClimbingType>,

    /// Water level increment per step, written as a score.
    pub great_deluge_water_level_increment_score: Option<String>,

    /// Water level increment per step as a ratio of the starting score.
    pub great_deluge_water_level_increment_ratio: Option<f64>,
}

impl AcceptorConfig {
    pub fn of_type(acceptor_type: AcceptorType) -> Self {
        Self {
            acceptor_types: vec![acceptor_type],
            ..Self::default()
        }
    }

    pub fn has_type(&self, acceptor_type: AcceptorType) -> bool {
        self.acceptor_types.contains(&acceptor_type)
    }
}

/// What counts towards the step counting hill climbing threshold update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCountingHillClimbingType {
    SelectedMove,
    AcceptedMove,
    #[default]
    Step,
    EqualOrImprovingStep,
    ImprovingStep,
}

/// Forager configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ForagerConfig {
    /// Maximum number of accepted moves to consider per step.
    pub accepted_count_limit: Option<usize>,

    /// Whether to pick early if an improving move is found.
    pub pick_early_type: Option<PickEarlyType>,

    /// Break ties between equally scored moves randomly. Defaults to true.
    pub break_tie_randomly: Option<bool>,

    /// How the candidates of a step are ranked. Defaults to highest score.
    pub finalist_podium_type: Option<FinalistPodiumType>,
}

impl ForagerConfig {
    pub fn with_accepted_count_limit(mut self, limit: usize) -> Self {
        self.accepted_count_limit = Some(limit);
        self
    }

    pub fn with_pick_early_type(mut self, pick_early_type: PickEarlyType) -> Self {
        self.pick_early_type = Some(pick_early_type);
        self
    }

    pub fn with_finalist_podium_type(mut self, finalist_podium_type: FinalistPodiumType) -> Self {
        self.finalist_podium_type = Some(finalist_podium_type);
        self
    }
}

/// How the forager ranks the candidates of a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalistPodiumType {
    /// The highest score wins.
    #[default]
    HighestScore,

    /// Same as `StrategicOscillationByLevel`.
    StrategicOscillation,

    /// While no candidate improves on the last step score, prefer the
    /// candidate that improves the highest score level that any candidate
    /// improves, even if that worsens a level above it.
    StrategicOscillationByLevel,

    /// Like `StrategicOscillationByLevel`, measured against the best score.
    StrategicOscillationByLevelOnBestScore,
}

/// Pick early type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickEarlyType {
    /// Never pick early.
    #[default]
    Never,

    /// Quit on the first accepted move that improves the best score.
    FirstBestScoreImproving,

    /// Quit on the first accepted move that improves the last step score.
    FirstLastStepScoreImproving,
}

/// Order in which a selector yields its moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Every move once, in a fixed order.
    Original,

    /// Moves sampled uniformly with replacement, never ending.
    #[default]
    Random,
}

/// Move selector configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveSelectorConfig {
    /// Change move selector.
    ChangeMoveSelector(ChangeMoveConfig),

    /// Swap move selector.
    SwapMoveSelector(SwapMoveConfig),

    /// Union of multiple selectors.
    UnionMoveSelector(UnionMoveSelectorConfig),
}

/// Change move configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChangeMoveConfig {
    pub selection_order: Option<SelectionOrder>,
}

/// Swap move configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SwapMoveConfig {
    pub selection_order: Option<SelectionOrder>,
}

/// Union move selector configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UnionMoveSelectorConfig {
    pub selection_order: Option<SelectionOrder>,

    /// Child selectors.
    #[serde(default)]
    pub selectors: Vec<MoveSelectorConfig>,
}

#[cfg(test)]
mod tests;

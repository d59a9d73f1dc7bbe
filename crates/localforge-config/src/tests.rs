//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "full_assert"
        random_seed = 42
        move_thread_count = { count = 4 }
        move_thread_buffer_size = 5

        [termination]
        seconds_spent_limit = 30
        unimproved_step_count_limit = 100

        [[phases]]
        type = "local_search"
        [phases.acceptor]
        acceptor_types = ["entity_tabu", "late_acceptance"]
        entity_tabu_size = 7
        late_acceptance_size = 400
        [phases.forager]
        accepted_count_limit = 1000
        pick_early_type = "first_best_score_improving"
        [phases.move_selector]
        type = "union_move_selector"
        selection_order = "random"
        selectors = [{ type = "change_move_selector" }, { type = "swap_move_selector" }]
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.move_thread_count, MoveThreadCount::Count(4));
    assert_eq!(config.resolved_move_thread_buffer_size().unwrap(), 5);
    let termination = config.termination.as_ref().unwrap();
    assert_eq!(termination.seconds_spent_limit, Some(30));
    assert_eq!(termination.unimproved_step_count_limit, Some(100));

    let PhaseConfig::LocalSearch(phase) = &config.phases[0];
    let acceptor = phase.acceptor.as_ref().unwrap();
    assert!(acceptor.has_type(AcceptorType::EntityTabu));
    assert!(acceptor.has_type(AcceptorType::LateAcceptance));
    assert_eq!(acceptor.entity_tabu_size, Some(7));
    let forager = phase.forager.as_ref().unwrap();
    assert_eq!(forager.accepted_count_limit, Some(1000));
    assert_eq!(
        forager.pick_early_type,
        Some(PickEarlyType::FirstBestScoreImproving)
    );
    match phase.move_selector.as_ref().unwrap() {
        MoveSelectorConfig::UnionMoveSelector(union) => {
            assert_eq!(union.selection_order, Some(SelectionOrder::Random));
            assert_eq!(union.selectors.len(), 2);
        }
        other => panic!("unexpected move selector {:?}", other),
    }
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: reproducible
        random_seed: 42
        termination:
          step_count_limit: 500
        phases:
          - type: local_search
            local_search_type: variable_neighborhood_descent
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    let PhaseConfig::LocalSearch(phase) = &config.phases[0];
    assert_eq!(
        phase.local_search_type,
        Some(LocalSearchType::VariableNeighborhoodDescent)
    );
}

#[test]
fn test_tabu_and_podium_properties() {
    let yaml = r#"
        phases:
          - type: local_search
            acceptor:
              entity_tabu_ratio: 0.2
              fading_entity_tabu_size: 3
              fading_value_tabu_ratio: 0.05
              fading_undo_move_tabu_size: 4
            forager:
              accepted_count_limit: 4
              finalist_podium_type: strategic_oscillation_by_level_on_best_score
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    let PhaseConfig::LocalSearch(phase) = &config.phases[0];
    let acceptor = phase.acceptor.as_ref().unwrap();
    assert!(acceptor.acceptor_types.is_empty());
    assert_eq!(acceptor.entity_tabu_ratio, Some(0.2));
    assert_eq!(acceptor.entity_tabu_size, None);
    assert_eq!(acceptor.fading_entity_tabu_size, Some(3));
    assert_eq!(acceptor.fading_value_tabu_ratio, Some(0.05));
    assert_eq!(acceptor.fading_undo_move_tabu_size, Some(4));
    let forager = phase.forager.as_ref().unwrap();
    assert_eq!(
        forager.finalist_podium_type,
        Some(FinalistPodiumType::StrategicOscillationByLevelOnBestScore)
    );
    assert_eq!(ForagerConfig::default().finalist_podium_type, None);
    assert_eq!(FinalistPodiumType::default(), FinalistPodiumType::HighestScore);
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_termination_steps(10)
        .with_phase(PhaseConfig::LocalSearch(
            LocalSearchConfig::default().with_local_search_type(LocalSearchType::HillClimbing),
        ));

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.termination.as_ref().unwrap().step_count_limit, Some(10));
    assert_eq!(config.phases.len(), 1);
}

#[test]
fn test_defaults() {
    let config = SolverConfig::default();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.move_thread_count, MoveThreadCount::None);
    assert_eq!(config.effective_random_seed(), Some(0));
    assert_eq!(
        config.resolved_move_thread_buffer_size().unwrap(),
        DEFAULT_MOVE_THREAD_BUFFER_SIZE
    );

    let non_reproducible = config.with_environment_mode(EnvironmentMode::NonReproducible);
    assert_eq!(non_reproducible.effective_random_seed(), None);
}

#[test]
fn test_environment_mode_levels() {
    assert!(EnvironmentMode::FullAssert.is_full_asserted());
    assert!(EnvironmentMode::FullAssert.is_fast_asserted());
    assert!(EnvironmentMode::FastAssert.is_fast_asserted());
    assert!(!EnvironmentMode::FastAssert.is_full_asserted());
    assert!(!EnvironmentMode::Reproducible.is_fast_asserted());
    assert!(!EnvironmentMode::NonReproducible.is_reproducible());
}

#[test]
fn test_move_thread_count_resolution() {
    assert_eq!(MoveThreadCount::None.resolve().unwrap(), None);
    assert_eq!(MoveThreadCount::Count(3).resolve().unwrap(), Some(3));
    assert!(MoveThreadCount::Count(0).resolve().is_err());
    if let Some(count) = MoveThreadCount::Auto.resolve().unwrap() {
        assert!((1..=4).contains(&count));
    }
}

#[test]
fn test_invalid_buffer_size() {
    let config = SolverConfig::from_toml_str("move_thread_buffer_size = 0").unwrap();
    let err = config.resolved_move_thread_buffer_size().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let converted: LocalForgeError = err.into();
    assert!(matches!(converted, LocalForgeError::Config(_)));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        SolverConfig::load("does/not/exist.toml"),
        Err(ConfigError::Io(_))
    ));
}

//! Tests for building local search phases from configuration.

use localforge_config::{
    AcceptorConfig, AcceptorType, ForagerConfig, LocalSearchConfig, LocalSearchType, MoveThreadCount,
    SolverConfig, TerminationConfig,
};
use localforge_core::LocalForgeError;

use super::{LocalSearchPhaseFactory, SolverPhaseFactory};
use crate::heuristic::selector::VariableAccessor;
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::NeverTermination;
use localforge_test::nqueens::{
    calculate_conflicts, create_nqueens_director, get_queen_row, queen_count, row_range, set_queen_row,
    NQueensDirector, NQueensSolution,
};

fn accessor() -> VariableAccessor<NQueensSolution, i64> {
    VariableAccessor::new(0, "row", get_queen_row, set_queen_row, queen_count, row_range)
}

fn build(config: LocalSearchConfig) -> Result<Box<dyn Phase<NQueensSolution, NQueensDirector>>, LocalForgeError> {
    LocalSearchPhaseFactory::new(config, accessor()).build_phase(0, &SolverConfig::new())
}

fn phase_debug(config: LocalSearchConfig) -> String {
    format!("{:?}", build(config).unwrap())
}

fn build_error(config: LocalSearchConfig) -> String {
    match build(config) {
        Err(LocalForgeError::Config(message)) => message,
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(phase) => panic!("expected an error, built {phase:?}"),
    }
}

/// Runs `steps` steps on 6 queens that all start on the first row.
fn run(mut phase: Box<dyn Phase<NQueensSolution, NQueensDirector>>, steps: u64) -> NQueensSolution {
    let mut solver_scope = SolverScope::with_seed(create_nqueens_director(&[0, 0, 0, 0, 0, 0]), 5);
    solver_scope.start_solving();
    phase.solve(&mut solver_scope, &NeverTermination).unwrap();
    assert_eq!(solver_scope.total_step_count(), steps);
    solver_scope.take_best_or_working_solution()
}

fn with_step_limit(config: LocalSearchConfig, steps: u64) -> LocalSearchConfig {
    config.with_termination(TerminationConfig {
        step_count_limit: Some(steps),
        ..TerminationConfig::default()
    })
}

#[test]
fn test_default_phase_is_late_acceptance() {
    let debug = phase_debug(LocalSearchConfig::default());
    assert!(debug.contains("LocalSearchDecider"), "{debug}");
    assert!(debug.contains("LateAcceptanceAcceptor"), "{debug}");
    assert!(debug.contains("accepted_count_limit: Some(1)"), "{debug}");
    assert!(debug.contains("Random"), "{debug}");
}

#[test]
fn test_tabu_search_preset() {
    let debug = phase_debug(LocalSearchConfig::default().with_local_search_type(LocalSearchType::TabuSearch));
    assert!(debug.contains("kind: Entity"), "{debug}");
    assert!(debug.contains("tabu_size: Fixed(7)"), "{debug}");
    assert!(debug.contains("accepted_count_limit: Some(1000)"), "{debug}");
}

#[test]
fn test_variable_neighborhood_descent_preset() {
    let debug = phase_debug(
        LocalSearchConfig::default().with_local_search_type(LocalSearchType::VariableNeighborhoodDescent),
    );
    assert!(debug.contains("HillClimbingAcceptor"), "{debug}");
    assert!(debug.contains("FirstLastStepScoreImproving"), "{debug}");
    assert!(debug.contains("accepted_count_limit: None"), "{debug}");
    assert!(!debug.contains("Random"), "{debug}");
}

#[test]
fn test_simulated_annealing_preset_needs_temperature() {
    let message = build_error(LocalSearchConfig::default().with_local_search_type(LocalSearchType::SimulatedAnnealing));
    assert!(message.contains("simulated_annealing_starting_temperature"), "{message}");
}

#[test]
fn test_type_with_explicit_acceptor_fails() {
    let config = LocalSearchConfig::default()
        .with_local_search_type(LocalSearchType::HillClimbing)
        .with_acceptor(AcceptorConfig::of_type(AcceptorType::LateAcceptance));
    let message = build_error(config);
    assert!(message.contains("local_search_type"), "{message}");
    assert!(message.contains("acceptor"), "{message}");
}

#[test]
fn test_type_with_explicit_forager_fails() {
    let config = LocalSearchConfig::default()
        .with_local_search_type(LocalSearchType::LateAcceptance)
        .with_forager(ForagerConfig::default().with_accepted_count_limit(5));
    assert!(build_error(config).contains("forager"));
}

#[test]
fn test_unbounded_forager_with_random_selection_fails_at_build() {
    let config = LocalSearchConfig::default()
        .with_acceptor(AcceptorConfig::of_type(AcceptorType::HillClimbing))
        .with_forager(ForagerConfig::default());
    assert!(build_error(config).contains("never ending"));
}

#[test]
fn test_explicit_acceptor_keeps_default_forager() {
    let config = LocalSearchConfig::default().with_acceptor(AcceptorConfig {
        simulated_annealing_starting_temperature: Some("2".to_string()),
        ..AcceptorConfig::default()
    });
    let debug = phase_debug(config.clone());
    assert!(debug.contains("SimulatedAnnealingAcceptor"), "{debug}");
    assert!(debug.contains("accepted_count_limit: Some(1)"), "{debug}");

    let best = run(build(with_step_limit(config, 4)).unwrap(), 4);
    assert_eq!(best.score, Some(calculate_conflicts(&best)));
}

#[test]
fn test_presets_run() {
    for local_search_type in [
        LocalSearchType::HillClimbing,
        LocalSearchType::TabuSearch,
        LocalSearchType::LateAcceptance,
        LocalSearchType::GreatDeluge,
        LocalSearchType::VariableNeighborhoodDescent,
    ] {
        let config = with_step_limit(
            LocalSearchConfig::default().with_local_search_type(local_search_type),
            5,
        );
        let best = run(build(config).unwrap(), 5);
        assert_eq!(best.score, Some(calculate_conflicts(&best)), "{local_search_type:?}");
        assert!(best.score > Some(calculate_conflicts(&NQueensSolution::with_rows(&[0, 0, 0, 0, 0, 0]))));
    }
}

#[test]
fn test_move_thread_count_builds_multithreaded_decider() {
    let solver_config = SolverConfig::new().with_move_thread_count(MoveThreadCount::Count(2));
    let factory = LocalSearchPhaseFactory::new(LocalSearchConfig::default(), accessor());
    let phase: Box<dyn Phase<NQueensSolution, NQueensDirector>> = factory.build_phase(0, &solver_config).unwrap();
    let debug = format!("{phase:?}");
    assert!(debug.contains("MultiThreadedDecider"), "{debug}");
    assert!(debug.contains("move_thread_count: 2"), "{debug}");
    assert!(debug.contains("selected_move_buffer_size: 20"), "{debug}");
}

#[test]
fn test_invalid_move_thread_settings_fail() {
    let factory = LocalSearchPhaseFactory::new(LocalSearchConfig::default(), accessor());

    let zero_threads = SolverConfig::new().with_move_thread_count(MoveThreadCount::Count(0));
    let result: Result<Box<dyn Phase<NQueensSolution, NQueensDirector>>, _> = factory.build_phase(0, &zero_threads);
    assert!(matches!(result, Err(LocalForgeError::Config(_))));

    let mut zero_buffer = SolverConfig::new().with_move_thread_count(MoveThreadCount::Count(2));
    zero_buffer.move_thread_buffer_size = Some(0);
    let result: Result<Box<dyn Phase<NQueensSolution, NQueensDirector>>, _> = factory.build_phase(0, &zero_buffer);
    assert!(matches!(result, Err(LocalForgeError::Config(_))));
}

#[test]
fn test_phase_factory_trait_creates_fresh_phases() {
    let factory = LocalSearchPhaseFactory::new(
        with_step_limit(LocalSearchConfig::default().with_local_search_type(LocalSearchType::TabuSearch), 3),
        accessor(),
    );
    let solver_config = SolverConfig::new();
    for _ in 0..2 {
        let phase: Box<dyn Phase<NQueensSolution, NQueensDirector>> =
            SolverPhaseFactory::create_phase(&factory, 1, &solver_config).unwrap();
        run(phase, 3);
    }
}

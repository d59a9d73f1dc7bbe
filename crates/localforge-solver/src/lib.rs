//! LocalForge local search engine
//!
//! This crate provides:
//! - Solver and SolverFactory
//! - The local search phase with its acceptors, foragers and deciders
//! - Multithreaded move evaluation
//! - Move system (change, swap) and move selectors
//! - Termination conditions
//! - Configuration wiring (manager module)

pub mod heuristic;
pub mod manager;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod termination;

pub use heuristic::{
    ChangeMove, ChangeMoveSelector, EitherMove, EitherMoveSelector, ListMoveSelector, Move,
    MoveSelector, SelectionOrder, SwapMove, SwapMoveSelector, UnionMoveSelector, VariableAccessor,
};
pub use manager::{
    AcceptorBuilder, ForagerBuilder, LocalSearchPhaseFactory, MoveSelectorBuilder, SolverFactory,
    SolverPhaseFactory, TerminationBuilder,
};
pub use phase::{
    localsearch::{
        AcceptedForager, Acceptor, CompositeAcceptor, Decider, GreatDelugeAcceptor,
        HillClimbingAcceptor, LateAcceptanceAcceptor, LocalSearchDecider, LocalSearchForager,
        LocalSearchPhase, MultiThreadedDecider, SimulatedAnnealingAcceptor,
        StepCountingHillClimbingAcceptor, TabuAcceptor, TabuKind, TabuSize, WaterLevelIncrement,
    },
    Phase,
};
pub use scope::{MoveScope, PhaseScope, SolverScope, StepScope};
pub use solver::Solver;
pub use termination::{
    AndTermination, BestScoreFeasibleTermination, BestScoreTermination, ChainedTermination,
    NeverTermination, OrTermination, StepCountTermination, Termination, TimeTermination,
    UnimprovedStepCountTermination, UnimprovedTimeTermination,
};

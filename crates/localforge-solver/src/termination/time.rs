//! Wall clock terminations.
//!
//! Solver checks measure from solving start, phase checks from phase
//! start. Before solving starts the solver clock reads as not elapsed.

use std::time::Duration;

use localforge_core::PlanningSolution;
use localforge_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

fn reached(elapsed: Option<Duration>, limit: Duration) -> bool {
    elapsed.is_some_and(|elapsed| elapsed >= limit)
}

/// Stops once the time spent reaches `limit`.
///
/// ```
/// use std::time::Duration;
/// use localforge_solver::termination::TimeTermination;
///
/// let termination = TimeTermination::new(Duration::from_millis(1500));
/// assert_eq!(termination.limit(), Duration::from_millis(1500));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn seconds(seconds: u64) -> Self {
        Self::new(Duration::from_secs(seconds))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for TimeTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        reached(solver_scope.elapsed(), self.limit)
    }

    fn is_phase_terminated(&self, _solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        reached(Some(phase_scope.elapsed()), self.limit)
    }
}

/// Stops once the best score has not improved for `limit`.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for UnimprovedTimeTermination {
    fn is_solver_terminated(&self, solver_scope: &SolverScope<S, D>) -> bool {
        reached(solver_scope.time_since_best(), self.limit)
    }

    fn is_phase_terminated(&self, _solver_scope: &SolverScope<S, D>, phase_scope: &PhaseScope<S>) -> bool {
        reached(Some(phase_scope.time_since_best()), self.limit)
    }
}

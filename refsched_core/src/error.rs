use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by [`Scheduler::optimize`](crate::Scheduler::optimize).
///
/// Data inconsistencies (a manual assignment referencing a game the
/// index cannot resolve) are deliberately *not* errors; they are logged
/// and the offending lock is skipped.
#[derive(Error, Debug, Serialize)]
pub enum ScheduleError {
    /// The instance cannot produce a decision tensor: empty referee or
    /// game set, or a degenerate slot dimension.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The hard constraints admit no assignment. Carries an irreducible
    /// infeasible subset when extraction ran.
    #[error("No feasible schedule exists for the given constraints")]
    Infeasible {
        report: Option<InfeasibilityReport>,
    },

    /// Any other solver failure. The domain model is left untouched.
    #[error("Solver failure: {0}")]
    Solver(String),
}

/// An irreducible infeasible subset: removing any listed constraint
/// would restore feasibility. `bounds` names the decision-variable
/// bounds the surviving constraints range over.
#[derive(Debug, Clone, Serialize)]
pub struct InfeasibilityReport {
    pub constraints: Vec<String>,
    pub bounds: Vec<String>,
}

//! Errors raised while resolving or validating a Markov Decision Process.

use thiserror::Error;

/// Errors produced by the solver and its validating front-end.
///
/// States and actions are stored in their `Debug` rendering so the error type
/// stays independent of the caller's identifier types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("transition from {state} via {action} leads to unknown state {next}")]
    UnknownState {
        state: String,
        action: String,
        next: String,
    },
    #[error("state {0} appears more than once in the state list")]
    DuplicateState(String),
    #[error("transition from {state} via {action} to {next} has probability {probability} outside [0, 1]")]
    InvalidProbability {
        state: String,
        action: String,
        next: String,
        probability: f64,
    },
    #[error("probabilities from {state} via {action} sum to {sum}, expected 1")]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
    },
    #[error("no value recorded for state {0}")]
    MissingValue(String),
    #[error("discount factor must lie in [0, 1), got {0}")]
    InvalidDiscount(f64),
    #[error("convergence threshold must be positive, got {0}")]
    InvalidThreshold(f64),
    #[error("iteration cap must be positive")]
    InvalidIterationCap,
}

pub type Result<T> = std::result::Result<T, Error>;

//! Finite Markov Decision Processes and their solution by value iteration.

pub mod config;
pub mod model;
pub mod validation;
pub mod value_iteration;

#[cfg(test)]
mod tests;

pub use config::{
    UpdateScheme, ValueIterationConfig, DEFAULT_GAMMA, DEFAULT_MAX_ITERATIONS, DEFAULT_THETA,
};
pub use model::Mdp;
pub use validation::{validate, validated_value_iteration, PROBABILITY_TOLERANCE};
pub use value_iteration::{bellman_residual, value_iteration, Termination, ValueIterationResult};

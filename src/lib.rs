#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod mdp;
pub mod models;

pub use error::{Error, Result};
pub use mdp::{
    validated_value_iteration, value_iteration, Mdp, UpdateScheme, ValueIterationConfig,
    ValueIterationResult,
};

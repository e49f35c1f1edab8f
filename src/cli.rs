//! Shared command-line plumbing for the example binaries.

use crate::error::Result;
use crate::mdp::{
    validated_value_iteration, value_iteration, Mdp, UpdateScheme, ValueIterationConfig,
    ValueIterationResult, DEFAULT_MAX_ITERATIONS, DEFAULT_THETA,
};
use clap::Parser;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Solver flags accepted by every binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct SolveArgs {
    /// Discount factor (defaults to the model's own)
    #[arg(long)]
    pub gamma: Option<f64>,
    /// Convergence threshold
    #[arg(long, default_value_t = DEFAULT_THETA)]
    pub theta: f64,
    /// Sweep cap; a run that never converges stops after this many sweeps
    /// plus one
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,
    /// Read only the previous sweep's values during a sweep
    #[arg(long)]
    pub synchronous: bool,
    /// Reject malformed probabilities and parameters before solving
    #[arg(long)]
    pub strict: bool,
}

impl SolveArgs {
    pub fn config(&self, model_gamma: f64) -> ValueIterationConfig {
        let scheme = if self.synchronous {
            UpdateScheme::Synchronous
        } else {
            UpdateScheme::InPlace
        };
        ValueIterationConfig::default()
            .with_gamma(self.gamma.unwrap_or(model_gamma))
            .with_theta(self.theta)
            .with_max_iterations(self.max_iterations)
            .with_scheme(scheme)
    }

    pub fn solve<S, A>(
        &self,
        mdp: &Mdp<S, A>,
        model_gamma: f64,
    ) -> Result<ValueIterationResult<S, A>>
    where
        S: Eq + Hash + Clone + Debug,
        A: Eq + Hash + Clone + Debug,
    {
        let config = self.config(model_gamma);
        log::info!(
            "solving {} states with gamma {} theta {} ({:?})",
            mdp.states.len(),
            config.gamma,
            config.theta,
            config.scheme
        );
        if self.strict {
            validated_value_iteration(mdp, &config)
        } else {
            value_iteration(mdp, &config)
        }
    }
}

/// Installs the terminal logger; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Formats the value function and policy as `state: value` and
/// `state: action` lines, in sweep order.
pub fn report<S, A>(result: &ValueIterationResult<S, A>) -> String
where
    S: Eq + Hash + Display,
    A: Display,
{
    let mut out = String::from("Optimal Value Function:\n");
    for (s, v, _) in result.iter() {
        out.push_str(&format!("  {}: {:.2}\n", s, v));
    }
    out.push_str("\nOptimal Policy:\n");
    for (s, _, a) in result.iter() {
        match a {
            Some(a) => out.push_str(&format!("  {}: {}\n", s, a)),
            None => out.push_str(&format!("  {}: None\n", s)),
        }
    }
    out
}

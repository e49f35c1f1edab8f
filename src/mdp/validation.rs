//! Optional checks run ahead of the solver. The solver itself accepts any
//! probabilities and discount factor; these checks reject input whose result
//! would be mathematically meaningless.

use crate::error::{Error, Result};
use crate::mdp::config::ValueIterationConfig;
use crate::mdp::model::Mdp;
use crate::mdp::value_iteration::{index_states, value_iteration, ValueIterationResult};
use num_traits::Float;
use std::fmt::Debug;
use std::hash::Hash;

/// Allowed deviation of a probability sum from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-8;

/// Checks `config` and every transition reachable from a non-terminal state
/// of `mdp`.
///
/// # Errors
/// - [`Error::InvalidDiscount`] unless `0 <= gamma < 1`.
/// - [`Error::InvalidThreshold`] unless `theta > 0`.
/// - [`Error::InvalidIterationCap`] if `max_iterations` is 0.
/// - [`Error::DuplicateState`] if a state is listed twice.
/// - [`Error::InvalidProbability`] for a probability outside [0, 1].
/// - [`Error::UnknownState`] for an outcome leading outside `mdp.states`.
/// - [`Error::ProbabilitySum`] if a listed action with outcomes has
///   probabilities not summing to 1 within [`PROBABILITY_TOLERANCE`].
pub fn validate<S, A, T>(mdp: &Mdp<S, A, T>, config: &ValueIterationConfig<T>) -> Result<()>
where
    S: Eq + Hash + Clone + Debug,
    A: Eq + Hash + Clone + Debug,
    T: Float + Debug,
{
    validate_config(config)?;

    let index = index_states(&mdp.states)?;
    let tolerance = T::from(PROBABILITY_TOLERANCE).unwrap_or_else(T::epsilon);

    for s in &mdp.states {
        for a in mdp.actions(s) {
            let outcomes = mdp.transitions(s, a);
            for (p, next) in outcomes {
                if !(T::zero()..=T::one()).contains(p) {
                    return Err(Error::InvalidProbability {
                        state: format!("{:?}", s),
                        action: format!("{:?}", a),
                        next: format!("{:?}", next),
                        probability: to_f64(*p),
                    });
                }
                if !index.contains_key(next) {
                    return Err(Error::UnknownState {
                        state: format!("{:?}", s),
                        action: format!("{:?}", a),
                        next: format!("{:?}", next),
                    });
                }
            }

            // An action without outcomes is a legal zero-valued choice.
            if outcomes.is_empty() {
                continue;
            }
            let sum = outcomes.iter().fold(T::zero(), |acc, (p, _)| acc + *p);
            if (sum - T::one()).abs() > tolerance {
                return Err(Error::ProbabilitySum {
                    state: format!("{:?}", s),
                    action: format!("{:?}", a),
                    sum: to_f64(sum),
                });
            }
        }
    }
    Ok(())
}

fn validate_config<T: Float + Debug>(config: &ValueIterationConfig<T>) -> Result<()> {
    if !(config.gamma >= T::zero() && config.gamma < T::one()) {
        return Err(Error::InvalidDiscount(to_f64(config.gamma)));
    }
    if !(config.theta > T::zero()) {
        return Err(Error::InvalidThreshold(to_f64(config.theta)));
    }
    if config.max_iterations == 0 {
        return Err(Error::InvalidIterationCap);
    }
    Ok(())
}

/// Runs [`validate`] and then [`value_iteration`]. For input that passes
/// validation the output is identical to calling the solver directly.
pub fn validated_value_iteration<S, A, T>(
    mdp: &Mdp<S, A, T>,
    config: &ValueIterationConfig<T>,
) -> Result<ValueIterationResult<S, A, T>>
where
    S: Eq + Hash + Clone + Debug,
    A: Eq + Hash + Clone + Debug,
    T: Float + Debug,
{
    validate(mdp, config)?;
    value_iteration(mdp, config)
}

fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

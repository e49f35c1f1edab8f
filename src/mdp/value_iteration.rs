//! Value iteration: repeated Bellman optimality backups until the largest
//! per-sweep change in the value function drops below a threshold.

use crate::error::{Error, Result};
use crate::mdp::config::{UpdateScheme, ValueIterationConfig};
use crate::mdp::model::Mdp;
use num_traits::Float;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Why the sweep loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The last sweep changed no value by `theta` or more.
    Converged,
    /// The sweep cap was reached first.
    Exhausted,
}

/// Result of a value iteration run.
#[derive(Debug, Clone)]
pub struct ValueIterationResult<S, A, T = f64> {
    /// States in the order they were swept
    pub states: Vec<S>,
    /// Value of every state; terminal states keep 0
    pub values: HashMap<S, T>,
    /// Greedy action of every state; `None` for terminal states
    pub policy: HashMap<S, Option<A>>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Largest value change seen during the last sweep
    pub delta: T,
    /// Whether `delta` fell below the threshold
    pub converged: bool,
}

impl<S, A, T> ValueIterationResult<S, A, T>
where
    S: Eq + Hash,
    T: Copy,
{
    pub fn value(&self, state: &S) -> Option<T> {
        self.values.get(state).copied()
    }

    /// The chosen action for `state`, or `None` if the state is terminal or
    /// unknown.
    pub fn action(&self, state: &S) -> Option<&A> {
        self.policy.get(state).and_then(Option::as_ref)
    }

    pub fn status(&self) -> Termination {
        if self.converged {
            Termination::Converged
        } else {
            Termination::Exhausted
        }
    }

    /// Iterates `(state, value, action)` in sweep order, skipping states
    /// without a recorded value.
    pub fn iter(&self) -> impl Iterator<Item = (&S, T, Option<&A>)> + '_ {
        self.states
            .iter()
            .filter_map(move |s| self.value(s).map(|v| (s, v, self.action(s))))
    }

    /// Drops the run statistics, leaving the value function and policy.
    pub fn into_parts(self) -> (HashMap<S, T>, HashMap<S, Option<A>>) {
        (self.values, self.policy)
    }
}

/// Outcomes of one action in index form: (next_state, probability, reward).
type Outcomes<T> = Vec<(usize, T, T)>;

/// For each state (in `states` order) the actions it offers with their
/// resolved outcomes. Terminal states get an empty row.
type Rows<'a, A, T> = Vec<Vec<(&'a A, Outcomes<T>)>>;

/// Performs value iteration on the given MDP.
///
/// Each sweep visits `mdp.states` in order and replaces the value of every
/// non-terminal state with
///
/// ```text
/// max_a  sum_{s'} P(s'|s,a) [ R(s,a,s') + gamma * V(s') ]
/// ```
///
/// recording the maximizing action. Ties go to the action listed first.
/// Sweeping stops once a sweep changes no value by `theta` or more, or once
/// the sweep count exceeds `max_iterations`, so a capped run performs
/// `max_iterations + 1` sweeps. Running out of sweeps is not an error; check
/// [`ValueIterationResult::converged`].
///
/// Probabilities and the discount factor are used as given. See
/// [`validated_value_iteration`](crate::mdp::validated_value_iteration) for
/// a checked variant.
///
/// # Errors
/// - [`Error::DuplicateState`] if a state is listed twice.
/// - [`Error::UnknownState`] if a non-terminal state has an outcome leading
///   outside `mdp.states`.
///
/// # Examples
///
/// ```
/// use valiter::mdp::{value_iteration, Mdp, ValueIterationConfig};
///
/// let mut mdp: Mdp<&str, &str> = Mdp::new(vec!["start", "end"]);
/// mdp.add_action("start", "finish")
///     .add_transition("start", "finish", 1.0, "end", 5.0);
///
/// let result = value_iteration(&mdp, &ValueIterationConfig::default()).unwrap();
///
/// assert_eq!(result.value(&"start"), Some(5.0));
/// assert_eq!(result.action(&"start"), Some(&"finish"));
/// assert_eq!(result.action(&"end"), None);
/// assert!(result.converged);
/// ```
pub fn value_iteration<S, A, T>(
    mdp: &Mdp<S, A, T>,
    config: &ValueIterationConfig<T>,
) -> Result<ValueIterationResult<S, A, T>>
where
    S: Eq + Hash + Clone + Debug,
    A: Eq + Hash + Clone + Debug,
    T: Float + Debug,
{
    let rows = resolve(mdp)?;
    let n = rows.len();
    let gamma = config.gamma;

    let mut values = vec![T::zero(); n];
    let mut choices: Vec<Option<usize>> = vec![None; n];
    let mut iterations = 0;

    let delta = loop {
        let delta = match config.scheme {
            UpdateScheme::InPlace => sweep(&rows, &mut values, &mut choices, gamma),
            UpdateScheme::Synchronous => {
                let previous = values.clone();
                sweep_from(&rows, &previous, &mut values, &mut choices, gamma)
            }
        };
        iterations += 1;
        log::trace!("sweep {} delta {:?}", iterations, delta);

        if delta < config.theta || iterations > config.max_iterations {
            break delta;
        }
    };

    let converged = delta < config.theta;
    if converged {
        log::info!(
            "value iteration converged after {} sweeps (delta {:?})",
            iterations,
            delta
        );
    } else {
        log::warn!(
            "value iteration stopped after {} sweeps without converging (delta {:?})",
            iterations,
            delta
        );
    }

    let policy = mdp
        .states
        .iter()
        .zip(&rows)
        .zip(&choices)
        .map(|((s, row), choice)| (s.clone(), choice.map(|a| row[a].0.clone())))
        .collect();

    Ok(ValueIterationResult {
        states: mdp.states.clone(),
        values: mdp.states.iter().cloned().zip(values).collect(),
        policy,
        iterations,
        delta,
        converged,
    })
}

/// Largest gap between `values` and one Bellman backup of them, over the
/// non-terminal states of `mdp`. Near zero once `values` is a fixed point.
///
/// # Errors
/// Fails like [`value_iteration`] on malformed input, and with
/// [`Error::MissingValue`] if a state of `mdp` has no entry in `values`.
pub fn bellman_residual<S, A, T>(
    mdp: &Mdp<S, A, T>,
    values: &HashMap<S, T>,
    gamma: T,
) -> Result<T>
where
    S: Eq + Hash + Clone + Debug,
    A: Eq + Hash + Clone + Debug,
    T: Float + Debug,
{
    let rows = resolve(mdp)?;
    let v = mdp
        .states
        .iter()
        .map(|s| {
            values
                .get(s)
                .copied()
                .ok_or_else(|| Error::MissingValue(format!("{:?}", s)))
        })
        .collect::<Result<Vec<T>>>()?;

    Ok(rows
        .iter()
        .zip(&v)
        .filter_map(|(row, &value)| {
            best_action(row, &v, gamma).map(|(_, q)| (value - q).abs())
        })
        .fold(T::zero(), T::max))
}

/// Maps every state to its position in `states`, rejecting duplicates.
pub(crate) fn index_states<S>(states: &[S]) -> Result<HashMap<&S, usize>>
where
    S: Eq + Hash + Debug,
{
    let mut index = HashMap::with_capacity(states.len());
    for (i, s) in states.iter().enumerate() {
        if index.insert(s, i).is_some() {
            return Err(Error::DuplicateState(format!("{:?}", s)));
        }
    }
    Ok(index)
}

/// Converts the keyed MDP into per-state rows of `(next, probability, reward)`
/// outcomes so sweeps only touch vectors. Only transitions of listed actions
/// of listed states are resolved; anything else is never consulted.
fn resolve<S, A, T>(mdp: &Mdp<S, A, T>) -> Result<Rows<'_, A, T>>
where
    S: Eq + Hash + Clone + Debug,
    A: Eq + Hash + Clone + Debug,
    T: Float,
{
    let index = index_states(&mdp.states)?;

    let rows = mdp
        .states
        .iter()
        .map(|s| {
            mdp.actions(s)
                .iter()
                .map(|a| {
                    let outcomes = mdp
                        .transitions(s, a)
                        .iter()
                        .map(|(p, next)| match index.get(next) {
                            Some(&j) => Ok((j, *p, mdp.reward(s, a, next))),
                            None => Err(Error::UnknownState {
                                state: format!("{:?}", s),
                                action: format!("{:?}", a),
                                next: format!("{:?}", next),
                            }),
                        })
                        .collect::<Result<Outcomes<T>>>()?;
                    Ok((a, outcomes))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Rows<'_, A, T>>>()?;

    log::debug!(
        "resolved {} states ({} terminal)",
        rows.len(),
        rows.iter().filter(|row| row.is_empty()).count()
    );
    Ok(rows)
}

/// Gauss-Seidel sweep: backups read values already updated this sweep.
fn sweep<A, T: Float>(
    rows: &[Vec<(&A, Outcomes<T>)>],
    values: &mut [T],
    choices: &mut [Option<usize>],
    gamma: T,
) -> T {
    let mut delta = T::zero();
    for (s, row) in rows.iter().enumerate() {
        if let Some((a, q)) = best_action(row, values, gamma) {
            delta = delta.max((values[s] - q).abs());
            values[s] = q;
            choices[s] = Some(a);
        }
    }
    delta
}

/// Jacobi sweep: every backup reads `previous`, results go to `values`.
fn sweep_from<A, T: Float>(
    rows: &[Vec<(&A, Outcomes<T>)>],
    previous: &[T],
    values: &mut [T],
    choices: &mut [Option<usize>],
    gamma: T,
) -> T {
    let mut delta = T::zero();
    for (s, row) in rows.iter().enumerate() {
        if let Some((a, q)) = best_action(row, previous, gamma) {
            delta = delta.max((previous[s] - q).abs());
            values[s] = q;
            choices[s] = Some(a);
        }
    }
    delta
}

/// Index and Q-value of the first action with the highest Q-value, or `None`
/// for a terminal state.
fn best_action<A, T: Float>(
    row: &[(&A, Outcomes<T>)],
    values: &[T],
    gamma: T,
) -> Option<(usize, T)> {
    let mut best: Option<(usize, T)> = None;
    for (a, (_, outcomes)) in row.iter().enumerate() {
        let q = compute_q_value(outcomes, values, gamma);
        if best.map_or(true, |(_, best_q)| q > best_q) {
            best = Some((a, q));
        }
    }
    best
}

/// Compute Q(s, a) = sum_{s'} P(s'|s,a) [ R(s,a,s') + gamma * V(s') ].
fn compute_q_value<T: Float>(outcomes: &[(usize, T, T)], values: &[T], gamma: T) -> T {
    let mut q = T::zero();
    for &(s_next, prob, reward) in outcomes {
        q = q + prob * (reward + gamma * values[s_next]);
    }
    q
}

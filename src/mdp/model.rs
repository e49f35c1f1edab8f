//! A finite Markov Decision Process with arbitrary state and action
//! identifiers and outcome-dependent rewards R(s, a, s').

use num_traits::Float;
use std::collections::HashMap;
use std::hash::Hash;

/// A Markov Decision Process in keyed form.
///
/// A state with no entry in `actions` (or an empty one) is terminal. A
/// (state, action) pair without transitions has no successors, and a missing
/// reward is zero. An outcome-independent reward R(s, a) is expressed by
/// giving every successor of (s, a) the same reward.
#[derive(Debug, Clone)]
pub struct Mdp<S, A, T = f64> {
    /// All states, in sweep order
    pub states: Vec<S>,
    /// Actions available in each state, in tie-breaking order
    pub actions: HashMap<S, Vec<A>>,
    /// For each (state, action), a list of (probability, next_state).
    ///
    /// Probabilities of one pair are expected to sum to 1.0. Only the
    /// validating front-end checks this.
    pub transitions: HashMap<(S, A), Vec<(T, S)>>,
    /// Reward for each (state, action, next_state)
    pub rewards: HashMap<(S, A, S), T>,
}

impl<S, A, T> Mdp<S, A, T>
where
    S: Eq + Hash + Clone,
    A: Eq + Hash + Clone,
    T: Float,
{
    /// Creates an MDP over `states` with no actions, so every state starts
    /// out terminal.
    pub fn new(states: Vec<S>) -> Self {
        Self {
            states,
            actions: HashMap::new(),
            transitions: HashMap::new(),
            rewards: HashMap::new(),
        }
    }

    pub fn from_parts(
        states: Vec<S>,
        actions: HashMap<S, Vec<A>>,
        transitions: HashMap<(S, A), Vec<(T, S)>>,
        rewards: HashMap<(S, A, S), T>,
    ) -> Self {
        Self {
            states,
            actions,
            transitions,
            rewards,
        }
    }

    /// Appends `action` to the actions of `state`.
    pub fn add_action(&mut self, state: S, action: A) -> &mut Self {
        self.actions.entry(state).or_default().push(action);
        self
    }

    /// Appends the outcome `(probability, next)` to `(state, action)` and
    /// sets R(state, action, next) to `reward`, replacing any earlier reward
    /// for that triple.
    pub fn add_transition(
        &mut self,
        state: S,
        action: A,
        probability: T,
        next: S,
        reward: T,
    ) -> &mut Self {
        self.rewards
            .insert((state.clone(), action.clone(), next.clone()), reward);
        self.transitions
            .entry((state, action))
            .or_default()
            .push((probability, next));
        self
    }

    pub fn actions(&self, state: &S) -> &[A] {
        self.actions.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_terminal(&self, state: &S) -> bool {
        self.actions(state).is_empty()
    }

    pub fn transitions(&self, state: &S, action: &A) -> &[(T, S)] {
        self.transitions
            .get(&(state.clone(), action.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn reward(&self, state: &S, action: &A, next: &S) -> T {
        self.rewards
            .get(&(state.clone(), action.clone(), next.clone()))
            .copied()
            .unwrap_or_else(T::zero)
    }
}

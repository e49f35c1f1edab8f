//! The "partying when sick" decision problem: a student picks between
//! relaxing and partying, trading immediate fun against the chance of
//! getting (or staying) sick.

use crate::mdp::Mdp;
use std::fmt;

/// Discount factor the model is usually solved with.
pub const GAMMA: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Health {
    Healthy,
    Sick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Activity {
    Relax,
    Party,
}

impl Health {
    pub const ALL: [Health; 2] = [Health::Healthy, Health::Sick];
}

impl Activity {
    pub const ALL: [Activity; 2] = [Activity::Relax, Activity::Party];
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Healthy => write!(f, "healthy"),
            Health::Sick => write!(f, "sick"),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Relax => write!(f, "relax"),
            Activity::Party => write!(f, "party"),
        }
    }
}

/// (state, action, reward, P(healthy next), P(sick next)); the reward does
/// not depend on the outcome.
const DYNAMICS: [(Health, Activity, f64, f64, f64); 4] = [
    (Health::Healthy, Activity::Relax, 7.0, 0.95, 0.05),
    (Health::Healthy, Activity::Party, 10.0, 0.7, 0.3),
    (Health::Sick, Activity::Relax, 0.0, 0.5, 0.5),
    (Health::Sick, Activity::Party, 2.0, 0.1, 0.9),
];

/// Builds the two-state model. Both activities are available in both states.
pub fn party() -> Mdp<Health, Activity> {
    let mut mdp = Mdp::new(Health::ALL.to_vec());
    for state in Health::ALL {
        for action in Activity::ALL {
            mdp.add_action(state, action);
        }
    }
    for (state, action, reward, healthy, sick) in DYNAMICS {
        mdp.add_transition(state, action, healthy, Health::Healthy, reward)
            .add_transition(state, action, sick, Health::Sick, reward);
    }
    mdp
}

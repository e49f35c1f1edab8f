use crate::mdp::{
    bellman_residual, value_iteration, validated_value_iteration, Mdp, Termination,
    UpdateScheme, ValueIterationConfig,
};
use crate::models::gridworld::{Cell, GridworldConfig, Move};
use crate::models::party::{party, Activity, Health};
use approx::{assert_abs_diff_eq, assert_relative_eq};

#[test]
fn test_party_prefers_partying_only_while_healthy() {
    let result = value_iteration(&party(), &ValueIterationConfig::default()).unwrap();

    assert!(result.converged);
    assert_eq!(result.action(&Health::Healthy), Some(&Activity::Party));
    assert_eq!(result.action(&Health::Sick), Some(&Activity::Relax));

    // V(h) = 10 + 0.8 (0.7 V(h) + 0.3 V(s)), V(s) = 0.8 (0.5 V(h) + 0.5 V(s))
    let healthy = result.value(&Health::Healthy).unwrap();
    let sick = result.value(&Health::Sick).unwrap();
    assert_abs_diff_eq!(healthy, 250.0 / 7.0, epsilon = 1e-4);
    assert_abs_diff_eq!(sick, 500.0 / 21.0, epsilon = 1e-4);
    assert!(healthy > sick);
}

#[test]
fn test_absorbing_terminal_converges_in_one_backup() {
    let mut mdp: Mdp<&str, &str> = Mdp::new(vec!["A", "B"]);
    mdp.add_action("A", "go")
        .add_transition("A", "go", 1.0, "B", 5.0);

    let result = value_iteration(&mdp, &ValueIterationConfig::default()).unwrap();

    assert_relative_eq!(result.value(&"A").unwrap(), 5.0);
    assert_eq!(result.value(&"B"), Some(0.0));
    assert_eq!(result.action(&"B"), None);
    assert_eq!(result.policy[&"B"], None);
    // The second sweep sees no change.
    assert_eq!(result.iterations, 2);
    assert_eq!(result.status(), Termination::Converged);
}

#[test]
fn test_wall_bounce_self_loop_contribution() {
    // One action bounces back with probability 0.5 and reward -1; the other
    // half reaches a terminal state with reward 0.
    let mut mdp: Mdp<&str, &str> = Mdp::new(vec!["s", "exit"]);
    mdp.add_action("s", "push")
        .add_transition("s", "push", 0.5, "s", -1.0)
        .add_transition("s", "push", 0.5, "exit", 0.0);

    let config = ValueIterationConfig::default().with_max_iterations(0);
    let first = value_iteration(&mdp, &config).unwrap();
    assert_relative_eq!(first.value(&"s").unwrap(), 0.5 * (-1.0 + 0.8 * 0.0));

    // V = 0.5 (-1 + 0.8 V)  =>  V = -0.5 / 0.6
    let result = value_iteration(&mdp, &ValueIterationConfig::default()).unwrap();
    assert_abs_diff_eq!(result.value(&"s").unwrap(), -0.5 / 0.6, epsilon = 1e-5);
}

#[test]
fn test_terminal_states_keep_initial_entries() {
    let mut mdp: Mdp<&str, &str> = Mdp::new(vec!["loop", "dead", "empty"]);
    mdp.add_action("loop", "spin")
        .add_transition("loop", "spin", 0.5, "dead", 3.0)
        .add_transition("loop", "spin", 0.5, "empty", 3.0);
    mdp.actions.insert("empty", vec![]);

    let result = value_iteration(&mdp, &ValueIterationConfig::default()).unwrap();
    for terminal in ["dead", "empty"] {
        assert_eq!(result.value(&terminal), Some(0.0));
        assert_eq!(result.action(&terminal), None);
    }
    assert_eq!(result.values.len(), 3);
    assert_eq!(result.policy.len(), 3);
}

#[test]
fn test_ties_go_to_the_first_listed_action() {
    let mut mdp: Mdp<&str, &str> = Mdp::new(vec!["s", "t"]);
    for action in ["second", "first"] {
        mdp.add_action("s", action)
            .add_transition("s", action, 1.0, "t", 2.0);
    }
    let result = value_iteration(&mdp, &ValueIterationConfig::default()).unwrap();
    assert_eq!(result.action(&"s"), Some(&"second"));
}

#[test]
fn test_action_without_transitions_is_worth_zero() {
    let mut mdp: Mdp<&str, &str> = Mdp::new(vec!["s", "t"]);
    mdp.add_action("s", "idle")
        .add_action("s", "lose")
        .add_transition("s", "lose", 1.0, "t", -1.0);
    let result = value_iteration(&mdp, &ValueIterationConfig::default()).unwrap();
    assert_eq!(result.action(&"s"), Some(&"idle"));
    assert_eq!(result.value(&"s"), Some(0.0));
}

#[test]
fn test_solution_satisfies_the_bellman_equation() {
    let mdp = GridworldConfig::default().build();
    let config = ValueIterationConfig::default().with_gamma(0.9);
    let result = value_iteration(&mdp, &config).unwrap();

    assert!(result.converged);
    assert!(result.delta < config.theta);
    let residual = bellman_residual(&mdp, &result.values, config.gamma).unwrap();
    assert!(residual < config.theta);
}

#[test]
fn test_gridworld_solution() {
    let mdp = GridworldConfig::default().build();
    let config = ValueIterationConfig::default().with_gamma(0.9);
    let result = validated_value_iteration(&mdp, &config).unwrap();

    let value = |row, col| result.value(&Cell::new(row, col)).unwrap();
    assert_abs_diff_eq!(value(7, 8), 13.0079, epsilon = 1e-3);
    assert_abs_diff_eq!(value(2, 7), 6.0079, epsilon = 1e-3);
    assert_abs_diff_eq!(value(7, 3), -6.2555, epsilon = 1e-3);
    assert_abs_diff_eq!(value(4, 3), -2.1634, epsilon = 1e-3);
    assert_abs_diff_eq!(value(0, 0), 0.9410, epsilon = 1e-3);

    // Every move out of a reward cell teleports, so the difference between
    // the two reward cells is exactly the difference of their rewards.
    assert_abs_diff_eq!(value(7, 8) - value(2, 7), 7.0, epsilon = 1e-4);

    let best = result
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(s, _, _)| *s);
    assert_eq!(best, Some(Cell::new(7, 8)));

    // All moves tie in an interior reward cell, so the first one wins.
    assert_eq!(result.action(&Cell::new(7, 8)), Some(&Move::Up));
    assert_eq!(result.action(&Cell::new(0, 0)), Some(&Move::Right));
    assert_eq!(result.action(&Cell::new(6, 8)), Some(&Move::Down));
}

#[test]
fn test_sweep_cap_bounds_the_run() {
    let mdp = GridworldConfig::default().build();
    let config = ValueIterationConfig::default()
        .with_gamma(0.9)
        .with_max_iterations(5);
    let result = value_iteration(&mdp, &config).unwrap();

    assert_eq!(result.iterations, 6);
    assert!(!result.converged);
    assert_eq!(result.status(), Termination::Exhausted);
    assert!(result.delta >= config.theta);
    // Shape is unchanged by early termination.
    assert_eq!(result.values.len(), 100);
    assert!(result.policy.values().all(Option::is_some));
}

#[test]
fn test_undiscounted_cycle_runs_to_the_cap() {
    let mut mdp: Mdp<&str, &str> = Mdp::new(vec!["s"]);
    mdp.add_action("s", "stay")
        .add_transition("s", "stay", 1.0, "s", 1.0);
    let config = ValueIterationConfig::default()
        .with_gamma(1.0)
        .with_max_iterations(50);

    let result = value_iteration(&mdp, &config).unwrap();
    assert_eq!(result.iterations, 51);
    assert_relative_eq!(result.value(&"s").unwrap(), 51.0);
    assert!(validated_value_iteration(&mdp, &config).is_err());
}

#[test]
fn test_repeated_solves_are_identical() {
    let mdp = GridworldConfig::default().build();
    let config = ValueIterationConfig::default().with_gamma(0.9);

    let first = value_iteration(&mdp, &config).unwrap();
    let second = value_iteration(&mdp, &config).unwrap();

    for (s, v, a) in first.iter() {
        assert_eq!(v.to_bits(), second.values[s].to_bits());
        assert_eq!(a, second.action(s));
    }
    assert_eq!(first.iterations, second.iterations);
}

#[test]
fn test_state_order_changes_trajectory_not_fixed_point() {
    let mdp = GridworldConfig::default().build();
    let mut reversed = mdp.clone();
    reversed.states.reverse();
    let config = ValueIterationConfig::default().with_gamma(0.9);

    let forward = value_iteration(&mdp, &config).unwrap();
    let backward = value_iteration(&reversed, &config).unwrap();
    let synchronous =
        value_iteration(&mdp, &config.with_scheme(UpdateScheme::Synchronous)).unwrap();

    for s in &mdp.states {
        assert_abs_diff_eq!(forward.values[s], backward.values[s], epsilon = 1e-4);
        assert_abs_diff_eq!(forward.values[s], synchronous.values[s], epsilon = 1e-4);
    }
}

#[test]
fn test_single_precision() {
    let mut mdp: Mdp<&str, &str, f32> = Mdp::new(vec!["A", "B"]);
    mdp.add_action("A", "go")
        .add_transition("A", "go", 1.0, "B", 5.0);
    let result = value_iteration(&mdp, &ValueIterationConfig::<f32>::default()).unwrap();
    assert_relative_eq!(result.value(&"A").unwrap(), 5.0f32);
}

#[test]
fn test_into_parts_matches_fields() {
    let result = value_iteration(&party(), &ValueIterationConfig::default()).unwrap();
    let expected_values = result.values.clone();
    let (values, policy) = result.into_parts();
    assert_eq!(values, expected_values);
    assert_eq!(policy[&Health::Healthy], Some(Activity::Party));
}

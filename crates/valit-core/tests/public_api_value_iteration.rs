use std::collections::HashMap;

use valit_core::{FnModel, Solver, SolverConfig, value_iteration};

const STATES: [&str; 2] = ["healthy", "sick"];
const ACTIONS: [&str; 2] = ["relax", "party"];

fn probs(state: &&str, action: &&str) -> Vec<f64> {
    match (*state, *action) {
        ("healthy", "relax") => vec![0.95, 0.05],
        ("healthy", "party") => vec![0.7, 0.3],
        ("sick", "relax") => vec![0.5, 0.5],
        _ => vec![0.1, 0.9],
    }
}

fn rewards(state: &&str, action: &&str) -> f64 {
    match (*state, *action) {
        ("healthy", "relax") => 7.0,
        ("healthy", "party") => 10.0,
        ("sick", "relax") => 0.0,
        _ => 2.0,
    }
}

fn solve(horizon: usize) -> (HashMap<&'static str, &'static str>, HashMap<&'static str, f64>) {
    value_iteration(&STATES, &ACTIONS, probs, rewards, 0.8, horizon).expect("solve should succeed")
}

fn max_abs_diff(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    STATES
        .iter()
        .map(|s| (a[s] - b[s]).abs())
        .fold(0.0, f64::max)
}

#[test]
fn public_two_state_known_answer() {
    let (policy, value) = solve(1000);

    assert_eq!(policy.len(), 2);
    assert_eq!(value.len(), 2);
    assert_eq!(policy["healthy"], "party");
    assert_eq!(policy["sick"], "relax");
    assert!((value["healthy"] - 35.714285714).abs() < 1e-6);
    assert!((value["sick"] - 23.809523810).abs() < 1e-6);
}

#[test]
fn public_one_more_sweep_changes_values_by_at_most_discounted_reward() {
    let max_reward = 10.0;
    for horizon in [1, 5, 20, 50] {
        let (_, shorter) = solve(horizon);
        let (_, longer) = solve(horizon + 1);
        let bound = 0.8_f64.powi(horizon as i32) * max_reward + 1e-12;
        assert!(
            max_abs_diff(&shorter, &longer) <= bound,
            "horizon {horizon} moved more than {bound}"
        );
    }

    let (_, h100) = solve(100);
    let (_, h101) = solve(101);
    assert!(max_abs_diff(&h100, &h101) < 1e-6);
}

#[test]
fn public_solver_matches_function_api() {
    let (policy, value) = solve(300);
    let solution = Solver::new(SolverConfig::new(0.8, 300))
        .solve(&STATES, &ACTIONS, &FnModel::new(probs, rewards))
        .expect("solve should succeed");

    assert_eq!(solution.policy(), &policy);
    for state in STATES {
        assert_eq!(solution.value_of(&state), Some(value[state]));
    }
}

#[test]
fn public_default_yaml_config_solves_with_finite_horizon() {
    let mut config = SolverConfig::from_default_yaml().expect("default yaml should parse");
    config.horizon = 10;

    let solution = Solver::new(config)
        .solve(&STATES, &ACTIONS, &FnModel::new(probs, rewards))
        .expect("solve should succeed");

    // Undiscounted values grow with the horizon but stay finite.
    assert_eq!(solution.metrics().sweeps_completed, 10);
    for (_, _, value) in solution.iter() {
        assert!(value.is_finite());
        assert!(value <= 100.0);
    }
}

use proptest::prelude::*;

use crate::{FnModel, Solver, SolverConfig, value_iteration};

#[derive(Debug, Clone)]
struct RandomMdp {
    states: usize,
    actions: usize,
    /// `probs[s][a]` is a distribution over all states.
    probs: Vec<Vec<Vec<f64>>>,
    rewards: Vec<Vec<f64>>,
}

impl RandomMdp {
    fn max_abs_reward(&self) -> f64 {
        self.rewards
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, r| acc.max(r.abs()))
    }
}

fn random_mdp() -> impl Strategy<Value = RandomMdp> {
    (1usize..6, 1usize..4).prop_flat_map(|(states, actions)| {
        let weights = proptest::collection::vec(
            proptest::collection::vec(proptest::collection::vec(0.0f64..1.0, states), actions),
            states,
        );
        let rewards = proptest::collection::vec(
            proptest::collection::vec(-10.0f64..10.0, actions),
            states,
        );
        (weights, rewards).prop_map(move |(weights, rewards)| {
            let probs = weights
                .into_iter()
                .map(|per_action| {
                    per_action
                        .into_iter()
                        .map(|row| {
                            let total: f64 = row.iter().sum();
                            if total <= f64::EPSILON {
                                let mut uniform = vec![0.0; row.len()];
                                uniform[0] = 1.0;
                                uniform
                            } else {
                                row.into_iter().map(|w| w / total).collect()
                            }
                        })
                        .collect()
                })
                .collect();
            RandomMdp {
                states,
                actions,
                probs,
                rewards,
            }
        })
    })
}

proptest! {
    #[test]
    fn values_stay_within_the_contraction_bound(
        mdp in random_mdp(),
        discount in 0.0f64..0.95,
        horizon in 1usize..60,
    ) {
        let states: Vec<usize> = (0..mdp.states).collect();
        let actions: Vec<usize> = (0..mdp.actions).collect();
        let model = FnModel::new(
            |s: &usize, a: &usize| mdp.probs[*s][*a].clone(),
            |s: &usize, a: &usize| mdp.rewards[*s][*a],
        );
        let bound = mdp.max_abs_reward() / (1.0 - discount) + 1e-9;

        let mut per_sweep_ok = true;
        let solver = Solver::new(SolverConfig::new(discount, horizon));
        // Sweep deltas are bounded by twice the value bound.
        let solution = solver
            .solve_with_hook(&states, &actions, &model, |sweep| {
                per_sweep_ok &= sweep.max_delta <= 2.0 * bound;
            })
            .expect("solve should succeed");

        prop_assert!(per_sweep_ok);
        prop_assert_eq!(solution.len(), mdp.states);
        prop_assert_eq!(solution.policy().len(), mdp.states);
        prop_assert_eq!(solution.values().len(), mdp.states);
        for (_, _, value) in solution.iter() {
            prop_assert!(value.abs() <= bound, "value {} exceeds bound {}", value, bound);
        }
    }

    #[test]
    fn repeated_solves_are_bit_identical(
        mdp in random_mdp(),
        discount in 0.0f64..0.99,
        horizon in 1usize..40,
    ) {
        let states: Vec<usize> = (0..mdp.states).collect();
        let actions: Vec<usize> = (0..mdp.actions).collect();
        let probs = |s: &usize, a: &usize| mdp.probs[*s][*a].clone();
        let rewards = |s: &usize, a: &usize| mdp.rewards[*s][*a];

        let (policy_a, value_a) =
            value_iteration(&states, &actions, probs, rewards, discount, horizon).expect("solve");
        let (policy_b, value_b) =
            value_iteration(&states, &actions, probs, rewards, discount, horizon).expect("solve");

        prop_assert_eq!(policy_a, policy_b);
        for state in &states {
            prop_assert_eq!(value_a[state].to_bits(), value_b[state].to_bits());
        }
    }

    #[test]
    fn policy_is_greedy_for_the_returned_values(
        mdp in random_mdp(),
        discount in 0.0f64..0.95,
        horizon in 1usize..40,
    ) {
        let states: Vec<usize> = (0..mdp.states).collect();
        let actions: Vec<usize> = (0..mdp.actions).collect();
        let probs = |s: &usize, a: &usize| mdp.probs[*s][*a].clone();
        let rewards = |s: &usize, a: &usize| mdp.rewards[*s][*a];

        let (policy, value) =
            value_iteration(&states, &actions, probs, rewards, discount, horizon).expect("solve");

        let q = |s: usize, a: usize| {
            let expected: f64 = mdp.probs[s][a]
                .iter()
                .enumerate()
                .map(|(next, p)| p * value[&next])
                .sum();
            mdp.rewards[s][a] + discount * expected
        };

        for &s in &states {
            let chosen = policy[&s];
            let chosen_q = q(s, chosen);
            for &a in &actions {
                let other = q(s, a);
                prop_assert!(other <= chosen_q, "action {} beats chosen {} in state {}", a, chosen, s);
                if a < chosen {
                    prop_assert!(other < chosen_q, "earlier tied action {} skipped in state {}", a, s);
                }
            }
        }
    }
}

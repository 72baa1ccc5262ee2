use std::collections::HashMap;
use std::hash::Hash;

use crate::solver::{ids::ActionIndex, metrics::SolveMetrics};

/// Greedy policy and value table produced by one value-iteration run.
///
/// Both maps hold exactly one entry per input state. `iter` walks the states
/// in the order they were supplied to the solver.
#[derive(Debug, Clone)]
pub struct Solution<S, A> {
    order: Vec<S>,
    policy: HashMap<S, A>,
    values: HashMap<S, f64>,
    metrics: SolveMetrics,
}

impl<S, A> Solution<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone,
{
    pub(crate) fn new(
        states: &[S],
        actions: &[A],
        best_actions: &[ActionIndex],
        values: &[f64],
        metrics: SolveMetrics,
    ) -> Self {
        let mut policy = HashMap::with_capacity(states.len());
        let mut value_map = HashMap::with_capacity(states.len());

        for ((state, action), &value) in states.iter().zip(best_actions).zip(values) {
            policy.insert(state.clone(), actions[action.index()].clone());
            value_map.insert(state.clone(), value);
        }

        Solution {
            order: states.to_vec(),
            policy,
            values: value_map,
            metrics,
        }
    }

    /// Mapping from each state to its greedy action.
    pub fn policy(&self) -> &HashMap<S, A> {
        &self.policy
    }

    /// Mapping from each state to its estimated optimal value.
    pub fn values(&self) -> &HashMap<S, f64> {
        &self.values
    }

    /// Greedy action for `state`, if it was part of the solve.
    pub fn action_for(&self, state: &S) -> Option<&A> {
        self.policy.get(state)
    }

    /// Estimated value of `state`, if it was part of the solve.
    pub fn value_of(&self, state: &S) -> Option<f64> {
        self.values.get(state).copied()
    }

    /// Iterate `(state, action, value)` in the caller's state order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &A, f64)> + '_ {
        self.order
            .iter()
            .filter_map(|state| {
                let action = self.policy.get(state)?;
                let value = self.values.get(state).copied()?;
                Some((state, action, value))
            })
    }

    /// Number of states covered by the solution.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn metrics(&self) -> &SolveMetrics {
        &self.metrics
    }

    /// Split into the `(policy, value)` maps.
    pub fn into_parts(self) -> (HashMap<S, A>, HashMap<S, f64>) {
        (self.policy, self.values)
    }
}

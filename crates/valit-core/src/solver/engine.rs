use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, trace};

use crate::solver::{
    config::{SolverConfig, Stopping},
    domain::StateDomain,
    error::{SolveError, SolverError},
    ids::{ActionIndex, StateIndex},
    metrics::{SolveMetrics, SweepMetrics},
    model::{FnModel, MdpModel},
    solution::Solution,
    value_table::ValueTables,
};

/// Value-iteration solver for finite MDPs.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Solver { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute the greedy policy and value table for `model`.
    pub fn solve<S, A, M>(
        &self,
        states: &[S],
        actions: &[A],
        model: &M,
    ) -> Result<Solution<S, A>, SolveError<M::Error>>
    where
        S: Clone + Eq + Hash + Debug,
        A: Clone + Eq + Hash + Debug,
        M: MdpModel<S, A>,
    {
        self.solve_with_hook(states, actions, model, |_| {})
    }

    /// Solve and invoke `on_sweep` after each completed sweep.
    pub fn solve_with_hook<S, A, M, FHook>(
        &self,
        states: &[S],
        actions: &[A],
        model: &M,
        mut on_sweep: FHook,
    ) -> Result<Solution<S, A>, SolveError<M::Error>>
    where
        S: Clone + Eq + Hash + Debug,
        A: Clone + Eq + Hash + Debug,
        M: MdpModel<S, A>,
        FHook: FnMut(&SweepMetrics),
    {
        let domain = StateDomain::index(states)?;
        if actions.is_empty() {
            return Err(SolverError::EmptyActions.into());
        }
        if self.config.horizon == 0 {
            return Err(SolverError::InvalidHorizon.into());
        }

        debug!(
            "value iteration: {} states, {} actions, discount={}, horizon={}, stopping={:?}",
            domain.len(),
            actions.len(),
            self.config.discount,
            self.config.horizon,
            self.config.stopping
        );

        let bellman = Bellman {
            domain: &domain,
            actions,
            model,
            discount: self.config.discount,
        };
        let mut tables = ValueTables::zeroed(domain.len());
        let mut metrics = SolveMetrics::new(self.config.horizon);

        for sweep in 1..=self.config.horizon {
            let (prev, next) = tables.split();
            bellman.sweep(prev, next)?;

            let sweep_metrics = SweepMetrics {
                sweep,
                max_delta: tables.max_delta(),
            };
            tables.swap();

            trace!(
                "sweep {} max_delta={:e}",
                sweep_metrics.sweep, sweep_metrics.max_delta
            );
            on_sweep(&sweep_metrics);
            metrics.record(sweep_metrics);

            if let Stopping::Tolerance { tolerance } = self.config.stopping {
                let delta = sweep_metrics.max_delta;
                if delta.is_finite() && delta < tolerance {
                    metrics.converged = true;
                    break;
                }
            }
        }

        let values = tables.into_current();
        let policy = bellman.greedy_policy(&values)?;

        debug!(
            "value iteration finished after {} sweeps (max_delta={:e}, converged={})",
            metrics.sweeps_completed, metrics.final_max_delta, metrics.converged
        );

        Ok(Solution::new(
            domain.as_slice(),
            actions,
            &policy,
            &values,
            metrics,
        ))
    }
}

/// Run `horizon` synchronous Bellman sweeps and return `(policy, value)`.
///
/// `probs(state, action)` must return one probability per entry of `states`,
/// in the same order. Neither `discount` nor the distributions are range
/// checked.
///
/// `Debug` on states and actions is used only to label a
/// [`SolverError::ShapeMismatch`].
pub fn value_iteration<S, A, P, R>(
    states: &[S],
    actions: &[A],
    probs: P,
    rewards: R,
    discount: f64,
    horizon: usize,
) -> Result<(HashMap<S, A>, HashMap<S, f64>), SolverError>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
    P: Fn(&S, &A) -> Vec<f64>,
    R: Fn(&S, &A) -> f64,
{
    let model = FnModel::new(probs, rewards);
    let solver = Solver::new(SolverConfig::new(discount, horizon));

    match solver.solve(states, actions, &model) {
        Ok(solution) => Ok(solution.into_parts()),
        Err(SolveError::Solver(err)) => Err(err),
        Err(SolveError::Model(never)) => match never {},
    }
}

/// One-step Bellman lookahead over a fixed state domain and action list.
struct Bellman<'a, 'd, S, A, M> {
    domain: &'d StateDomain<'a, S>,
    actions: &'a [A],
    model: &'a M,
    discount: f64,
}

impl<S, A, M> Bellman<'_, '_, S, A, M>
where
    S: Eq + Hash + Debug,
    A: Debug,
    M: MdpModel<S, A>,
{
    /// `Q(s, a) = r(s, a) + discount * sum_i P(s_i | s, a) * V[s_i]`.
    fn q_value(
        &self,
        state_key: StateIndex,
        action_key: ActionIndex,
        values: &[f64],
    ) -> Result<f64, SolveError<M::Error>> {
        let state = self.domain.get(state_key);
        let action = &self.actions[action_key.index()];

        let reward = self.model.reward(state, action).map_err(SolveError::Model)?;
        let distribution = self
            .model
            .transition(state, action)
            .map_err(SolveError::Model)?;

        if distribution.len() != values.len() {
            return Err(SolverError::ShapeMismatch {
                state: state_key,
                action: action_key,
                state_label: format!("{state:?}"),
                action_label: format!("{action:?}"),
                expected: values.len(),
                actual: distribution.len(),
            }
            .into());
        }

        let expected: f64 = distribution.iter().zip(values).map(|(p, v)| p * v).sum();
        Ok(reward + self.discount * expected)
    }

    /// Highest-valued action for a state; ties keep the earliest action.
    fn best_action(
        &self,
        state_key: StateIndex,
        values: &[f64],
    ) -> Result<(ActionIndex, f64), SolveError<M::Error>> {
        let mut best: Option<(ActionIndex, f64)> = None;

        for idx in 0..self.actions.len() {
            let action_key = ActionIndex::from(idx);
            let q = self.q_value(state_key, action_key, values)?;
            match best {
                Some((_, best_q)) if q > best_q => best = Some((action_key, q)),
                None => best = Some((action_key, q)),
                _ => {}
            }
        }

        best.ok_or(SolveError::Solver(SolverError::EmptyActions))
    }

    /// Synchronous update: read only `prev`, write only `next`.
    fn sweep(&self, prev: &[f64], next: &mut [f64]) -> Result<(), SolveError<M::Error>> {
        for (idx, slot) in next.iter_mut().enumerate() {
            let (_, value) = self.best_action(StateIndex::from(idx), prev)?;
            *slot = value;
        }
        Ok(())
    }

    fn greedy_policy(&self, values: &[f64]) -> Result<Vec<ActionIndex>, SolveError<M::Error>> {
        (0..self.domain.len())
            .map(|idx| {
                self.best_action(StateIndex::from(idx), values)
                    .map(|(action, _)| action)
            })
            .collect()
    }
}

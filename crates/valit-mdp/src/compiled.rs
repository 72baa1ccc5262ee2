use std::collections::HashMap;

use log::debug;
use valit_core::{MdpModel, Solution, SolveError, Solver, SolverConfig};

use crate::{MdpError, MdpSpec};

/// Floating point tolerance used when validating probability sums.
pub(crate) const PROB_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Dense index for states in a compiled MDP.
pub struct StateKey(usize);

impl StateKey {
    /// Return the underlying state index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone)]
/// Dense runtime form of a tabular MDP.
///
/// Probabilities are stored per `(state, action)` as one entry per state in
/// declaration order, which is the layout the value-iteration solver expects.
pub struct CompiledMdp {
    state_ids: Vec<String>,
    action_ids: Vec<String>,
    state_id_to_key: HashMap<String, StateKey>,
    action_id_to_index: HashMap<String, usize>,
    /// Indexed `[state][action]`.
    entries: Vec<Vec<EntryRec>>,
}

#[derive(Debug, Clone)]
struct EntryRec {
    reward: f64,
    probs: Vec<f64>,
    /// Next states with positive probability and their running CDF.
    support: Vec<StateKey>,
    cdf: Vec<f64>,
}

impl CompiledMdp {
    /// Compile and validate a spec into a dense runtime representation.
    pub(crate) fn from_spec(spec: &MdpSpec) -> Result<Self, MdpError> {
        spec.validate_with_tolerance(PROB_TOLERANCE)?;

        let state_id_to_key: HashMap<String, StateKey> = spec
            .states
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), StateKey::from(idx)))
            .collect();
        let action_id_to_index: HashMap<String, usize> = spec
            .actions
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        let n_states = spec.states.len();
        let mut slots: Vec<Vec<Option<EntryRec>>> = vec![vec![None; spec.actions.len()]; n_states];

        for transition in &spec.transitions {
            let state = lookup(&state_id_to_key, &transition.state, || MdpError::UnknownState {
                state: transition.state.clone(),
            })?;
            let action = lookup(&action_id_to_index, &transition.action, || {
                MdpError::UnknownAction {
                    action: transition.action.clone(),
                }
            })?;

            let mut probs = vec![0.0; n_states];
            for next in &transition.next {
                let key = lookup(&state_id_to_key, &next.state, || MdpError::UnknownState {
                    state: next.state.clone(),
                })?;
                probs[key.index()] = next.prob;
            }

            let mut support = Vec::new();
            let mut cdf = Vec::new();
            let mut cumulative = 0.0_f64;
            for (idx, &prob) in probs.iter().enumerate() {
                if prob > 0.0 {
                    cumulative += prob;
                    support.push(StateKey::from(idx));
                    cdf.push(cumulative);
                }
            }

            slots[state.index()][action] = Some(EntryRec {
                reward: transition.reward,
                probs,
                support,
                cdf,
            });
        }

        let mut entries = Vec::with_capacity(n_states);
        for (state_idx, row) in slots.into_iter().enumerate() {
            let mut actions = Vec::with_capacity(row.len());
            for (action_idx, slot) in row.into_iter().enumerate() {
                let entry = slot.ok_or_else(|| MdpError::MissingTransition {
                    state: spec.states[state_idx].clone(),
                    action: spec.actions[action_idx].clone(),
                })?;
                actions.push(entry);
            }
            entries.push(actions);
        }

        debug!(
            "compiled tabular mdp: {} states, {} actions",
            spec.states.len(),
            spec.actions.len()
        );

        Ok(Self {
            state_ids: spec.states.clone(),
            action_ids: spec.actions.clone(),
            state_id_to_key,
            action_id_to_index,
            entries,
        })
    }

    /// Return the number of compiled states.
    pub fn state_count(&self) -> usize {
        self.state_ids.len()
    }

    /// Return the number of actions available in every state.
    pub fn action_count(&self) -> usize {
        self.action_ids.len()
    }

    /// State ids in canonical order.
    pub fn state_ids(&self) -> &[String] {
        &self.state_ids
    }

    /// Action ids in preference order.
    pub fn action_ids(&self) -> &[String] {
        &self.action_ids
    }

    /// Convert a state key back to its original string id.
    pub fn state_id(&self, key: StateKey) -> Option<&str> {
        self.state_ids.get(key.index()).map(String::as_str)
    }

    /// Convert a string id into a compiled state key.
    pub fn state_key(&self, id: &str) -> Option<StateKey> {
        self.state_id_to_key.get(id).copied()
    }

    /// Convert an action index back to its original string id.
    pub fn action_id(&self, action: usize) -> Option<&str> {
        self.action_ids.get(action).map(String::as_str)
    }

    /// Convert a string id into an action index.
    pub fn action_index(&self, id: &str) -> Option<usize> {
        self.action_id_to_index.get(id).copied()
    }

    /// Dense next-state distribution for `(state, action)`.
    pub fn probabilities(&self, key: StateKey, action: usize) -> Option<&[f64]> {
        self.entry(key, action).map(|entry| entry.probs.as_slice())
    }

    /// Immediate reward for `(state, action)`.
    pub fn reward_for(&self, key: StateKey, action: usize) -> Option<f64> {
        self.entry(key, action).map(|entry| entry.reward)
    }

    /// Run value iteration over every state and action of this model.
    pub fn solve(
        &self,
        config: &SolverConfig,
    ) -> Result<Solution<String, String>, SolveError<MdpError>> {
        Solver::new(config.clone()).solve(&self.state_ids, &self.action_ids, self)
    }

    /// Sample one transition for `(state_key, action)` using a uniform sample in `[0, 1)`.
    pub(crate) fn sample_transition(
        &self,
        state_key: StateKey,
        action: usize,
        sample: f64,
    ) -> Option<(StateKey, f64)> {
        let entry = self.entry(state_key, action)?;
        if entry.support.is_empty() {
            return None;
        }

        let mut chosen_idx = entry.cdf.partition_point(|p| *p <= sample);
        if chosen_idx >= entry.support.len() {
            chosen_idx = entry.support.len() - 1;
        }

        Some((entry.support[chosen_idx], entry.reward))
    }

    fn entry(&self, key: StateKey, action: usize) -> Option<&EntryRec> {
        self.entries.get(key.index())?.get(action)
    }

    fn keys_for(&self, state: &str, action: &str) -> Result<(StateKey, usize), MdpError> {
        let key = self.state_key(state).ok_or_else(|| MdpError::UnknownState {
            state: state.to_string(),
        })?;
        let action = self.action_index(action).ok_or_else(|| MdpError::UnknownAction {
            action: action.to_string(),
        })?;
        Ok((key, action))
    }
}

impl MdpModel<String, String> for CompiledMdp {
    type Error = MdpError;

    fn transition(&self, state: &String, action: &String) -> Result<Vec<f64>, MdpError> {
        let (key, action) = self.keys_for(state, action)?;
        Ok(self.entries[key.index()][action].probs.clone())
    }

    fn reward(&self, state: &String, action: &String) -> Result<f64, MdpError> {
        let (key, action) = self.keys_for(state, action)?;
        Ok(self.entries[key.index()][action].reward)
    }
}

fn lookup<V: Copy>(
    map: &HashMap<String, V>,
    id: &str,
    missing: impl FnOnce() -> MdpError,
) -> Result<V, MdpError> {
    map.get(id).copied().ok_or_else(missing)
}

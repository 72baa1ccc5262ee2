use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CompiledMdp, MdpError, compiled::PROB_TOLERANCE};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Serializable tabular MDP schema used for YAML IO and validation.
///
/// Every action is available in every state, and every `(state, action)`
/// pair must have exactly one transition entry.
pub struct MdpSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// State ids in canonical order.
    pub states: Vec<String>,
    /// Action ids in preference order; earlier actions win ties.
    pub actions: Vec<String>,
    pub transitions: Vec<TransitionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Reward and next-state distribution for one `(state, action)` pair.
pub struct TransitionSpec {
    pub state: String,
    pub action: String,
    pub reward: f64,
    /// Next states with non-zero probability; omitted states get 0.
    #[serde(default)]
    pub next: Vec<NextSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One reachable next state.
pub struct NextSpec {
    pub state: String,
    pub prob: f64,
}

impl MdpSpec {
    /// Validate schema invariants using the crate default tolerance.
    pub fn validate(&self) -> Result<(), MdpError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Validate ids, transition coverage, and probability constraints.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), MdpError> {
        if self.states.is_empty() {
            return Err(MdpError::EmptyStates);
        }
        if self.actions.is_empty() {
            return Err(MdpError::EmptyActions);
        }

        let mut state_ids = HashSet::with_capacity(self.states.len());
        for id in &self.states {
            if !state_ids.insert(id.as_str()) {
                return Err(MdpError::DuplicateStateId { id: id.clone() });
            }
        }

        let mut action_ids = HashSet::with_capacity(self.actions.len());
        for id in &self.actions {
            if !action_ids.insert(id.as_str()) {
                return Err(MdpError::DuplicateActionId { id: id.clone() });
            }
        }

        let mut declared = HashSet::with_capacity(self.transitions.len());
        for transition in &self.transitions {
            let state = transition.state.as_str();
            let action = transition.action.as_str();

            if !state_ids.contains(state) {
                return Err(MdpError::UnknownState {
                    state: state.to_string(),
                });
            }
            if !action_ids.contains(action) {
                return Err(MdpError::UnknownAction {
                    action: action.to_string(),
                });
            }
            if !declared.insert((state, action)) {
                return Err(MdpError::DuplicateTransition {
                    state: state.to_string(),
                    action: action.to_string(),
                });
            }

            if !transition.reward.is_finite() {
                return Err(MdpError::InvalidReward {
                    state: state.to_string(),
                    action: action.to_string(),
                    value: transition.reward,
                });
            }

            let mut seen_next = HashSet::with_capacity(transition.next.len());
            let mut sum = 0.0_f64;
            for (i, next) in transition.next.iter().enumerate() {
                if !state_ids.contains(next.state.as_str()) {
                    return Err(MdpError::UnknownState {
                        state: next.state.clone(),
                    });
                }
                if !seen_next.insert(next.state.as_str()) {
                    return Err(MdpError::DuplicateNextState {
                        state: state.to_string(),
                        action: action.to_string(),
                        next: next.state.clone(),
                    });
                }
                if !next.prob.is_finite() || next.prob < 0.0 {
                    return Err(MdpError::InvalidProbability {
                        state: state.to_string(),
                        action: action.to_string(),
                        next_index: i,
                        value: next.prob,
                    });
                }
                sum += next.prob;
            }

            // Probabilities for one pair must sum to 1 within tolerance.
            if (sum - 1.0).abs() > tolerance {
                return Err(MdpError::ProbabilitySum {
                    state: state.to_string(),
                    action: action.to_string(),
                    sum,
                    tolerance,
                });
            }
        }

        // Every pair needs a transition; report the first gap in declaration order.
        for state in &self.states {
            for action in &self.actions {
                if !declared.contains(&(state.as_str(), action.as_str())) {
                    return Err(MdpError::MissingTransition {
                        state: state.clone(),
                        action: action.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Compile this spec into the dense runtime representation.
    pub fn compile(&self) -> Result<CompiledMdp, MdpError> {
        CompiledMdp::from_spec(self)
    }
}

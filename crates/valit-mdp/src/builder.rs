use crate::{CompiledMdp, MdpError, MdpSpec, NextSpec, TransitionSpec};

#[derive(Debug, Clone, Default)]
/// Incremental builder for tabular MDPs.
pub struct MdpBuilder {
    states: Vec<String>,
    actions: Vec<String>,
    transitions: Vec<TransitionSpec>,
}

impl MdpBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a state; declaration order is the canonical state order.
    pub fn add_state(&mut self, id: impl Into<String>) -> &mut Self {
        self.states.push(id.into());
        self
    }

    /// Append an action available in every state.
    pub fn add_action(&mut self, id: impl Into<String>) -> &mut Self {
        self.actions.push(id.into());
        self
    }

    /// Set the immediate reward for `(state, action)`.
    pub fn set_reward(
        &mut self,
        state_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        reward: f64,
    ) -> Result<&mut Self, MdpError> {
        let transition = self.transition_mut(state_id.as_ref(), action_id.as_ref())?;
        transition.reward = reward;
        Ok(self)
    }

    /// Add a next-state outcome with probability `prob` to `(state, action)`.
    pub fn add_outcome(
        &mut self,
        state_id: impl AsRef<str>,
        action_id: impl AsRef<str>,
        next: impl AsRef<str>,
        prob: f64,
    ) -> Result<&mut Self, MdpError> {
        let next = next.as_ref();
        if !self.states.iter().any(|s| s == next) {
            return Err(MdpError::BuilderUnknownState {
                state: next.to_string(),
            });
        }

        let transition = self.transition_mut(state_id.as_ref(), action_id.as_ref())?;
        transition.next.push(NextSpec {
            state: next.to_string(),
            prob,
        });
        Ok(self)
    }

    pub fn build_spec(self) -> Result<MdpSpec, MdpError> {
        let spec = MdpSpec {
            version: Some(1),
            states: self.states,
            actions: self.actions,
            transitions: self.transitions,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<CompiledMdp, MdpError> {
        let spec = self.build_spec()?;
        spec.compile()
    }

    /// Find or create the transition entry for `(state, action)`.
    fn transition_mut(
        &mut self,
        state_id: &str,
        action_id: &str,
    ) -> Result<&mut TransitionSpec, MdpError> {
        if !self.states.iter().any(|s| s == state_id) {
            return Err(MdpError::BuilderUnknownState {
                state: state_id.to_string(),
            });
        }
        if !self.actions.iter().any(|a| a == action_id) {
            return Err(MdpError::BuilderUnknownAction {
                action: action_id.to_string(),
            });
        }

        let position = self
            .transitions
            .iter()
            .position(|t| t.state == state_id && t.action == action_id);
        let idx = match position {
            Some(idx) => idx,
            None => {
                self.transitions.push(TransitionSpec {
                    state: state_id.to_string(),
                    action: action_id.to_string(),
                    reward: 0.0,
                    next: Vec::new(),
                });
                self.transitions.len() - 1
            }
        };

        Ok(&mut self.transitions[idx])
    }
}

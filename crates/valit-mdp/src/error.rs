use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for MDP loading, validation, compilation, lookup, and builder operations.
pub enum MdpError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("model declares no states")]
    EmptyStates,

    #[error("model declares no actions")]
    EmptyActions,

    #[error("duplicate state id '{id}'")]
    DuplicateStateId { id: String },

    #[error("duplicate action id '{id}'")]
    DuplicateActionId { id: String },

    #[error("unknown state '{state}'")]
    UnknownState { state: String },

    #[error("unknown action '{action}'")]
    UnknownAction { action: String },

    #[error("transition for state '{state}', action '{action}' is declared more than once")]
    DuplicateTransition { state: String, action: String },

    #[error("no transition declared for state '{state}', action '{action}'")]
    MissingTransition { state: String, action: String },

    #[error("transition for state '{state}', action '{action}' lists next state '{next}' twice")]
    DuplicateNextState {
        state: String,
        action: String,
        next: String,
    },

    #[error(
        "invalid probability in state '{state}', action '{action}', next {next_index}: {value}"
    )]
    InvalidProbability {
        state: String,
        action: String,
        next_index: usize,
        value: f64,
    },

    #[error("invalid reward in state '{state}', action '{action}': {value}")]
    InvalidReward {
        state: String,
        action: String,
        value: f64,
    },

    #[error(
        "probability sum for state '{state}', action '{action}' must be within {tolerance} of 1.0, got {sum}"
    )]
    ProbabilitySum {
        state: String,
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("builder referenced unknown state '{state}'")]
    BuilderUnknownState { state: String },

    #[error("builder referenced unknown action '{action}'")]
    BuilderUnknownAction { action: String },
}

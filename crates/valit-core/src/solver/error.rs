use std::fmt;

use crate::solver::ids::{ActionIndex, StateIndex};

/// Error type for inputs the value-iteration engine cannot evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The state sequence was empty.
    EmptyStates,
    /// The action sequence was empty.
    EmptyActions,
    /// The same state appeared twice in the state sequence.
    DuplicateState {
        first: StateIndex,
        duplicate: StateIndex,
        label: String,
    },
    /// A horizon of zero sweeps was requested.
    InvalidHorizon,
    /// A transition distribution did not have one entry per state.
    ShapeMismatch {
        state: StateIndex,
        action: ActionIndex,
        state_label: String,
        action_label: String,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::EmptyStates => write!(f, "empty domain: no states were supplied"),
            SolverError::EmptyActions => write!(f, "empty domain: no actions were supplied"),
            SolverError::DuplicateState {
                first,
                duplicate,
                label,
            } => write!(
                f,
                "state {label} appears at positions {} and {}",
                first.index(),
                duplicate.index()
            ),
            SolverError::InvalidHorizon => write!(f, "horizon must be greater than 0"),
            SolverError::ShapeMismatch {
                state,
                action,
                state_label,
                action_label,
                expected,
                actual,
            } => write!(
                f,
                "transition for state {state_label} (#{}) and action {action_label} (#{}) has {actual} entries, expected {expected}",
                state.index(),
                action.index()
            ),
        }
    }
}

impl std::error::Error for SolverError {}

/// Error returned by a solve: either the engine rejected its inputs or the
/// model failed for some `(state, action)` pair.
#[derive(Debug)]
pub enum SolveError<E> {
    Solver(SolverError),
    Model(E),
}

impl<E> From<SolverError> for SolveError<E> {
    fn from(err: SolverError) -> Self {
        SolveError::Solver(err)
    }
}

impl<E: fmt::Display> fmt::Display for SolveError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Solver(err) => write!(f, "{err}"),
            SolveError::Model(err) => write!(f, "model callback failed: {err}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for SolveError<E> {}

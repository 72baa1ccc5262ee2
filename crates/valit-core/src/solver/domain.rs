use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::solver::{error::SolverError, ids::StateIndex};

/// Canonical state order for one solve, fixed by the caller's slice order.
#[derive(Debug)]
pub(crate) struct StateDomain<'a, S> {
    states: &'a [S],
}

impl<'a, S> StateDomain<'a, S>
where
    S: Eq + Hash + Debug,
{
    /// Assign every state its index, rejecting empty and repeated states.
    pub(crate) fn index(states: &'a [S]) -> Result<Self, SolverError> {
        if states.is_empty() {
            return Err(SolverError::EmptyStates);
        }

        let mut seen: HashMap<&S, StateIndex> = HashMap::with_capacity(states.len());
        for (idx, state) in states.iter().enumerate() {
            if let Some(first) = seen.insert(state, StateIndex::from(idx)) {
                return Err(SolverError::DuplicateState {
                    first,
                    duplicate: StateIndex::from(idx),
                    label: format!("{state:?}"),
                });
            }
        }

        Ok(Self { states })
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn get(&self, key: StateIndex) -> &'a S {
        &self.states[key.index()]
    }

    pub(crate) fn as_slice(&self) -> &'a [S] {
        self.states
    }
}

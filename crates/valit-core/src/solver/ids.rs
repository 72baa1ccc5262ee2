/// Position of a state in the caller's canonical state order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StateIndex(usize);

impl StateIndex {
    /// Return the position of this state in the canonical order.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for StateIndex {
    fn from(value: usize) -> Self {
        StateIndex(value)
    }
}

/// Position of an action in the caller's action order.
/// Earlier actions win exact ties during policy extraction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ActionIndex(usize);

impl ActionIndex {
    /// Return the position of this action in the caller's order.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ActionIndex {
    fn from(value: usize) -> Self {
        ActionIndex(value)
    }
}

use bevy::prelude::*;

/// Generation number of a model load. Only the most recently issued token is
/// allowed to change what is displayed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(pub u64);

/// Issues load tokens and remembers the current one.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    issued: u64,
}

impl LoadTracker {
    /// Start a new load, superseding every earlier one.
    pub fn begin(&mut self) -> LoadToken {
        self.issued += 1;
        LoadToken(self.issued)
    }

    pub fn is_current(&self, token: LoadToken) -> bool {
        self.issued != 0 && token.0 == self.issued
    }

    pub fn current(&self) -> Option<LoadToken> {
        (self.issued != 0).then_some(LoadToken(self.issued))
    }
}

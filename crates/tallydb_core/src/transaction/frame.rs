//! Undo frame state.

use crate::error::CoreResult;
use crate::store::Store;
use std::collections::HashMap;

/// What a key looked like before a frame first touched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorState {
    /// The key did not exist.
    Absent,
    /// The key held this value.
    HadValue(String),
}

impl PriorState {
    /// Captures the current state of `key` in `store`.
    #[must_use]
    pub fn capture(store: &Store, key: &str) -> Self {
        match store.get(key) {
            Some(value) => Self::HadValue(value.to_string()),
            None => Self::Absent,
        }
    }

    /// Puts `key` back into this state.
    ///
    /// Restoration goes through the store's raw primitives, so the reverse
    /// index is adjusted against the value the key holds right now.
    pub fn restore(&self, store: &mut Store, key: &str) -> CoreResult<()> {
        match self {
            Self::Absent => store.raw_delete(key).map(|_| ()),
            Self::HadValue(value) => store.raw_put(key, value),
        }
    }
}

/// Undo record for one BEGIN nesting level.
///
/// Holds at most one [`PriorState`] per key: the state from before the
/// frame's first mutation of that key.
#[derive(Debug, Default, Clone)]
pub struct UndoFrame {
    prior: HashMap<String, PriorState>,
}

impl UndoFrame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current state of `key` unless the frame already has it.
    ///
    /// Returns true if a new entry was captured.
    pub fn record_first_touch(&mut self, store: &Store, key: &str) -> bool {
        if self.prior.contains_key(key) {
            return false;
        }
        self.prior
            .insert(key.to_string(), PriorState::capture(store, key));
        true
    }

    /// Returns the recorded prior state of `key`.
    #[must_use]
    pub fn prior_state(&self, key: &str) -> Option<&PriorState> {
        self.prior.get(key)
    }

    /// Returns the number of keys this frame touched.
    #[must_use]
    pub fn touched_count(&self) -> usize {
        self.prior.len()
    }

    /// Returns true if the frame has not touched any key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prior.is_empty()
    }

    /// Restores every touched key to its recorded prior state.
    ///
    /// Each key's entry is independent, so iteration order does not matter.
    pub fn apply(self, store: &mut Store) -> CoreResult<()> {
        for (key, prior) in &self.prior {
            prior.restore(store, key)?;
        }
        Ok(())
    }
}

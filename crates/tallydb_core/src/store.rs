//! Primary key → value storage.

use crate::error::{CoreError, CoreResult};
use crate::index::ReverseIndex;
use std::collections::HashMap;

/// The live key → value map together with its [`ReverseIndex`].
///
/// `Store` exposes raw mutation primitives only. It knows nothing about
/// transactions; every primitive leaves the reverse index matching the
/// actual contents of the map, so the index stays correct at any
/// transaction depth and undo logic can restore state through the same
/// primitives.
#[derive(Debug, Default, Clone)]
pub struct Store {
    entries: HashMap<String, String>,
    index: ReverseIndex,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store pre-sized for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            index: ReverseIndex::with_capacity(capacity),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the number of keys currently holding `value`.
    #[must_use]
    pub fn count_of(&self, value: &str) -> usize {
        self.index.count_of(value)
    }

    /// Sets `key` to `value`, re-indexing any value it replaces.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the replaced value was not indexed.
    pub fn raw_put(&mut self, key: &str, value: &str) -> CoreResult<()> {
        match self.entries.get_mut(key) {
            Some(current) => {
                if current.as_str() == value {
                    return Ok(());
                }
                self.index.decrement(current)?;
                value.clone_into(current);
            }
            None => {
                self.entries.insert(key.to_string(), value.to_string());
            }
        }
        self.index.increment(value);
        Ok(())
    }

    /// Removes `key`, returning the value it held.
    ///
    /// Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the removed value was not indexed.
    pub fn raw_delete(&mut self, key: &str) -> CoreResult<Option<String>> {
        let Some(old) = self.entries.remove(key) else {
            return Ok(None);
        };
        self.index.decrement(&old)?;
        Ok(Some(old))
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the reverse index.
    #[must_use]
    pub fn index(&self) -> &ReverseIndex {
        &self.index
    }

    /// Rebuilds the reverse index from the stored values and compares it to
    /// the maintained one.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the first mismatch found.
    pub fn check_invariants(&self) -> CoreResult<()> {
        let expected: ReverseIndex = self.entries.values().cloned().collect();
        if expected == self.index {
            return Ok(());
        }

        for (value, count) in expected.iter() {
            let actual = self.index.count_of(value);
            if actual != count {
                return Err(CoreError::invariant_violation(format!(
                    "value {value:?} held by {count} keys but indexed as {actual}"
                )));
            }
        }
        for (value, count) in self.index.iter() {
            if expected.count_of(value) == 0 {
                return Err(CoreError::invariant_violation(format!(
                    "value {value:?} indexed as {count} but held by no key"
                )));
            }
        }
        Err(CoreError::invariant_violation("reverse index mismatch"))
    }
}

//! Value frequency index.

use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;

/// Counts how many keys currently hold each value.
///
/// The index is pure bookkeeping: it has no notion of keys or transactions.
/// Callers are responsible for pairing every `increment` with a later
/// `decrement` of the same value. A value whose count drops to zero is
/// removed, so the map never carries zero entries.
///
/// # Example
///
/// ```rust
/// use tallydb_core::ReverseIndex;
///
/// let mut index = ReverseIndex::new();
/// index.increment("10");
/// index.increment("10");
/// assert_eq!(index.count_of("10"), 2);
///
/// index.decrement("10").unwrap();
/// assert_eq!(index.count_of("10"), 1);
/// assert_eq!(index.count_of("20"), 0);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReverseIndex {
    counts: HashMap<String, usize>,
}

impl ReverseIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty index pre-sized for `capacity` distinct values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity(capacity),
        }
    }

    /// Records one more key holding `value`.
    pub fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    /// Records one fewer key holding `value`.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if `value` is not indexed.
    pub fn decrement(&mut self, value: &str) -> CoreResult<()> {
        let Some(count) = self.counts.get_mut(value) else {
            return Err(CoreError::invariant_violation(format!(
                "decrement of unindexed value {value:?}"
            )));
        };

        if *count <= 1 {
            self.counts.remove(value);
        } else {
            *count -= 1;
        }
        Ok(())
    }

    /// Returns the number of keys holding `value`.
    #[must_use]
    pub fn count_of(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the number of distinct indexed values.
    #[must_use]
    pub fn distinct_values(&self) -> usize {
        self.counts.len()
    }

    /// Iterates over `(value, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(value, count)| (value.as_str(), *count))
    }

    /// Returns true if no value is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<String> for ReverseIndex {
    fn from_iter<I: IntoIterator<Item = String>>(values: I) -> Self {
        let mut index = Self::new();
        for value in values {
            index.increment(&value);
        }
        index
    }
}

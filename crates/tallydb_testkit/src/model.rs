//! Reference model for differential testing.
//!
//! [`ModelStore`] implements the same command semantics as the engine in
//! the most direct way possible: BEGIN copies the whole map, ROLLBACK puts
//! the copy back, and NUMEQUALTO scans every entry. It is slow but obviously
//! correct, which makes it a good oracle for property tests.

use std::collections::HashMap;
use tallydb_core::{Command, Engine, Reply};

/// Snapshot-based model of the engine.
#[derive(Debug, Default, Clone)]
pub struct ModelStore {
    data: HashMap<String, String>,
    snapshots: Vec<HashMap<String, String>>,
}

impl ModelStore {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a command and returns the reply the engine should give.
    pub fn apply(&mut self, command: &Command) -> Reply {
        match command {
            Command::Set { key, value } => {
                self.data.insert(key.clone(), value.clone());
                Reply::Empty
            }
            Command::Unset { key } => {
                self.data.remove(key);
                Reply::Empty
            }
            Command::Get { key } => Reply::from(self.data.get(key).map(String::as_str)),
            Command::NumEqualTo { value } => {
                Reply::Count(self.data.values().filter(|v| *v == value).count())
            }
            Command::Begin => {
                self.snapshots.push(self.data.clone());
                Reply::Empty
            }
            Command::Commit => {
                if self.snapshots.is_empty() {
                    return Reply::NoTransaction;
                }
                self.snapshots.clear();
                Reply::Empty
            }
            Command::Rollback => match self.snapshots.pop() {
                Some(snapshot) => {
                    self.data = snapshot;
                    Reply::Empty
                }
                None => Reply::NoTransaction,
            },
            Command::Ignored(_) => Reply::Empty,
        }
    }

    /// Returns the number of open transactions.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns the model's current contents.
    pub fn data(&self) -> &HashMap<String, String> {
        &self.data
    }
}

/// Checks that `engine` holds exactly the same keys and values as `model`
/// and that its reverse index agrees with a full scan.
pub fn assert_matches_model(engine: &Engine, model: &ModelStore) {
    assert_eq!(engine.len(), model.data().len(), "key count differs");
    assert_eq!(engine.depth(), model.depth(), "transaction depth differs");

    for (key, value) in model.data() {
        assert_eq!(
            engine.store().get(key),
            Some(value.as_str()),
            "value differs for key {key:?}"
        );
        let expected = model.data().values().filter(|v| *v == value).count();
        assert_eq!(
            engine.store().count_of(value),
            expected,
            "count differs for value {value:?}"
        );
    }

    engine
        .check_invariants()
        .unwrap_or_else(|e| panic!("reverse index inconsistent: {e}"));
}

//! Thread-safe engine handle.

use crate::command::Command;
use crate::engine::Engine;
use crate::error::CoreResult;
use crate::reply::Reply;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, thread-safe handle to one [`Engine`].
///
/// The whole engine (store, reverse index and transaction stack) sits
/// behind a single lock that is held for the duration of each command, so
/// commands from different threads never interleave. Transactions are
/// still engine-wide: a BEGIN from one handle is visible to all of them.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    /// Wraps an engine.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Executes one command atomically.
    ///
    /// # Errors
    ///
    /// See [`Engine::execute`].
    pub fn execute(&self, command: &Command) -> CoreResult<Reply> {
        self.inner.lock().execute(command)
    }

    /// Parses and executes one line atomically.
    ///
    /// # Errors
    ///
    /// See [`Engine::execute`].
    pub fn execute_line(&self, line: &str) -> CoreResult<Reply> {
        self.execute(&Command::parse(line))
    }

    /// Runs `f` with exclusive access to the engine.
    ///
    /// Use this to group several commands into one atomic step.
    pub fn with_engine<T>(&self, f: impl FnOnce(&mut Engine) -> T) -> T {
        f(&mut *self.inner.lock())
    }
}

impl From<Engine> for SharedEngine {
    fn from(engine: Engine) -> Self {
        Self::new(engine)
    }
}

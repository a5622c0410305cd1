//! Line-oriented command sessions.

use crate::config::Config;
use crate::engine::Engine;
use crate::error::CoreResult;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Outcome of [`Session::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Number of lines executed (the terminator is not counted).
    pub commands: usize,
    /// Whether the session ended on the terminator rather than end of input.
    pub terminated: bool,
}

/// Drives an [`Engine`] from a stream of newline-delimited commands.
///
/// Every line produces exactly one output line, written and flushed before
/// the next line is read. A line equal to the configured terminator ends the
/// session without a reply.
///
/// # Example
///
/// ```rust
/// use tallydb_core::Session;
///
/// let input = b"SET a 10\nGET a\nEND\nGET a\n";
/// let mut output = Vec::new();
///
/// let mut session = Session::new();
/// let summary = session.run(&input[..], &mut output).unwrap();
///
/// assert_eq!(String::from_utf8(output).unwrap(), "\n10\n");
/// assert_eq!(summary.commands, 2);
/// assert!(summary.terminated);
/// ```
#[derive(Debug, Default)]
pub struct Session {
    engine: Engine,
}

impl Session {
    /// Creates a session over a fresh engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session over a fresh engine.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            engine: Engine::with_config(config),
        }
    }

    /// Creates a session over an existing engine.
    #[must_use]
    pub fn with_engine(engine: Engine) -> Self {
        Self { engine }
    }

    /// Runs commands from `reader` until the terminator or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading or writing fails, or
    /// `InvariantViolation` if the engine state is corrupted.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> CoreResult<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                debug!("end of input");
                break;
            }

            // Invalid UTF-8 becomes replacement characters; the line is
            // still answered like any other.
            let line = String::from_utf8_lossy(&buf);
            let command = line.trim_end_matches(['\n', '\r']);
            if command == self.engine.config().terminator {
                summary.terminated = true;
                break;
            }

            let reply = self.engine.execute_line(command)?;
            writeln!(writer, "{reply}")?;
            writer.flush()?;
            summary.commands += 1;
        }

        info!(
            commands = summary.commands,
            terminated = summary.terminated,
            open_transactions = self.engine.depth(),
            "session finished"
        );
        Ok(summary)
    }

    /// Returns the engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Consumes the session, returning its engine.
    #[must_use]
    pub fn into_engine(self) -> Engine {
        self.engine
    }
}

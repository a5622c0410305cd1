//! Command engine.

use crate::command::Command;
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::reply::Reply;
use crate::stats::EngineStats;
use crate::store::Store;
use crate::transaction::TransactionStack;
use tracing::{debug, error, trace, warn};

/// The main TallyDB handle.
///
/// `Engine` owns the [`Store`] (with its reverse index) and the
/// [`TransactionStack`], and routes every command through them:
/// - mutations capture an undo record in the top frame, then hit the store
/// - reads go straight to the store, so they always see the latest values
/// - COMMIT closes every open level; ROLLBACK undoes only the innermost
///
/// # Example
///
/// ```rust
/// use tallydb_core::{Engine, Reply};
///
/// let mut engine = Engine::new();
/// engine.execute_line("SET a 10").unwrap();
/// engine.execute_line("BEGIN").unwrap();
/// engine.execute_line("SET a 20").unwrap();
/// assert_eq!(engine.execute_line("NUMEQUALTO 10").unwrap(), Reply::Count(0));
///
/// engine.execute_line("ROLLBACK").unwrap();
/// assert_eq!(engine.execute_line("GET a").unwrap(), Reply::Value("10".into()));
/// assert_eq!(engine.execute_line("COMMIT").unwrap(), Reply::NoTransaction);
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    /// Configuration.
    config: Config,
    /// Live data and reverse index.
    store: Store,
    /// Open transactions.
    transactions: TransactionStack,
    /// Operation counters.
    stats: EngineStats,
}

impl Engine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            store: Store::with_capacity(config.initial_capacity),
            transactions: TransactionStack::new(),
            stats: EngineStats::new(),
            config,
        }
    }

    /// Parses and executes one input line.
    ///
    /// # Errors
    ///
    /// See [`Engine::execute`].
    pub fn execute_line(&mut self, line: &str) -> CoreResult<Reply> {
        self.execute(&Command::parse(line))
    }

    /// Executes one command and returns its reply.
    ///
    /// Transaction misuse is reported through the reply, never as an error.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the store and reverse index have
    /// diverged. The engine must not be used afterwards.
    pub fn execute(&mut self, command: &Command) -> CoreResult<Reply> {
        let result = match command {
            Command::Set { key, value } => self.set(key, value).map(|()| Reply::Empty),
            Command::Unset { key } => self.unset(key).map(|()| Reply::Empty),
            Command::Get { key } => Ok(Reply::from(self.get(key))),
            Command::NumEqualTo { value } => Ok(Reply::Count(self.num_equal_to(value))),
            Command::Begin => self.begin().map(|()| Reply::Empty),
            Command::Commit => self.commit().map(|()| Reply::Empty),
            Command::Rollback => self.rollback().map(|()| Reply::Empty),
            Command::Ignored(raw) => {
                debug!(input = %raw, "ignoring unrecognized command");
                self.record(EngineStats::record_ignored);
                Ok(Reply::Empty)
            }
        };

        match result {
            Err(CoreError::NoActiveTransaction) => {
                self.record(EngineStats::record_rejected);
                Ok(Reply::NoTransaction)
            }
            Err(CoreError::DepthLimitExceeded { limit }) => {
                warn!(limit, "transaction depth limit reached; BEGIN ignored");
                self.record(EngineStats::record_rejected);
                Ok(Reply::Empty)
            }
            Err(err) => {
                error!(command = %command, error = %err, "engine state corrupted");
                Err(err)
            }
            ok => ok,
        }
    }

    /// Sets `key` to `value`.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the reverse index is inconsistent.
    pub fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        trace!(key, value, depth = self.depth(), "set");
        self.transactions.record_first_touch(&self.store, key);
        self.store.raw_put(key, value)?;
        self.record(EngineStats::record_write);
        Ok(())
    }

    /// Removes `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the reverse index is inconsistent.
    pub fn unset(&mut self, key: &str) -> CoreResult<()> {
        trace!(key, depth = self.depth(), "unset");
        self.transactions.record_first_touch(&self.store, key);
        self.store.raw_delete(key)?;
        self.record(EngineStats::record_delete);
        Ok(())
    }

    /// Returns the current value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.record(EngineStats::record_read);
        self.store.get(key)
    }

    /// Returns how many keys currently hold `value`.
    #[must_use]
    pub fn num_equal_to(&self, value: &str) -> usize {
        self.record(EngineStats::record_count_query);
        self.store.count_of(value)
    }

    /// Opens a (possibly nested) transaction.
    ///
    /// # Errors
    ///
    /// Returns `DepthLimitExceeded` if `max_depth` is configured and reached.
    pub fn begin(&mut self) -> CoreResult<()> {
        if let Some(limit) = self.config.max_depth {
            if self.transactions.depth() >= limit {
                return Err(CoreError::depth_limit_exceeded(limit));
            }
        }
        self.transactions.begin_frame();
        self.record(EngineStats::record_begin);
        debug!(depth = self.depth(), "transaction begun");
        Ok(())
    }

    /// Makes every open transaction level permanent.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` if no transaction is open.
    pub fn commit(&mut self) -> CoreResult<()> {
        let depth = self.depth();
        if !self.transactions.commit_all() {
            return Err(CoreError::NoActiveTransaction);
        }
        self.record(EngineStats::record_commit);
        debug!(levels = depth, "transactions committed");
        Ok(())
    }

    /// Undoes the innermost open transaction.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` if no transaction is open, or
    /// `InvariantViolation` if restoring the store breaks the reverse index.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let touched = self.transactions.top().map_or(0, |f| f.touched_count());
        if !self.transactions.pop_and_apply(&mut self.store)? {
            return Err(CoreError::NoActiveTransaction);
        }
        self.record(EngineStats::record_rollback);
        debug!(touched, depth = self.depth(), "transaction rolled back");
        Ok(())
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.transactions.depth()
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.transactions.is_active()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Verifies that the reverse index matches the store contents.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the mismatch.
    pub fn check_invariants(&self) -> CoreResult<()> {
        self.store.check_invariants()
    }

    fn record(&self, counter: fn(&EngineStats)) {
        if self.config.collect_stats {
            counter(&self.stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(engine: &mut Engine, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .map(|line| engine.execute_line(line).unwrap().to_string())
            .collect()
    }

    #[test]
    fn autocommit_mutations_are_immediate() {
        let mut engine = Engine::new();
        engine.set("a", "1").unwrap();
        assert_eq!(engine.get("a"), Some("1"));
        assert!(!engine.in_transaction());
        assert_eq!(engine.rollback().unwrap_err().to_string(), "no transaction");
        assert_eq!(engine.get("a"), Some("1"));
    }

    #[test]
    fn rollback_restores_absent_key() {
        let mut engine = Engine::new();
        let out = run(
            &mut engine,
            &["NUMEQUALTO v", "BEGIN", "SET k v", "ROLLBACK", "GET k", "NUMEQUALTO v"],
        );
        assert_eq!(out, vec!["0", "", "", "", "NULL", "0"]);
    }

    #[test]
    fn commit_is_global() {
        let mut engine = Engine::new();
        let out = run(
            &mut engine,
            &["BEGIN", "SET a 1", "BEGIN", "SET a 2", "COMMIT", "GET a", "ROLLBACK"],
        );
        assert_eq!(out, vec!["", "", "", "", "", "2", "NO TRANSACTION"]);
        assert_eq!(engine.depth(), 0);
    }

    #[test]
    fn rollback_is_local() {
        let mut engine = Engine::new();
        let out = run(
            &mut engine,
            &["BEGIN", "SET a 1", "BEGIN", "SET a 2", "ROLLBACK", "GET a"],
        );
        assert_eq!(out, vec!["", "", "", "", "", "1"]);
        assert!(engine.in_transaction());
        assert_eq!(engine.depth(), 1);
        assert_eq!(engine.execute_line("COMMIT").unwrap(), Reply::Empty);
    }

    #[test]
    fn first_touch_restores_pre_begin_value() {
        let mut engine = Engine::new();
        let out = run(
            &mut engine,
            &["SET a 0", "BEGIN", "SET a 1", "SET a 2", "SET a 3", "ROLLBACK", "GET a"],
        );
        assert_eq!(out.last().map(String::as_str), Some("0"));
        assert_eq!(engine.num_equal_to("3"), 0);
        assert_eq!(engine.num_equal_to("0"), 1);
    }

    #[test]
    fn unset_inside_transaction_is_undone() {
        let mut engine = Engine::new();
        let out = run(
            &mut engine,
            &["SET a 10", "BEGIN", "UNSET a", "GET a", "NUMEQUALTO 10", "ROLLBACK", "GET a", "NUMEQUALTO 10"],
        );
        assert_eq!(out, vec!["", "", "", "NULL", "0", "", "10", "1"]);
    }

    #[test]
    fn unset_of_absent_key_inside_transaction() {
        let mut engine = Engine::new();
        let out = run(&mut engine, &["BEGIN", "UNSET ghost", "ROLLBACK", "GET ghost"]);
        assert_eq!(out, vec!["", "", "", "NULL"]);
        engine.check_invariants().unwrap();
    }

    #[test]
    fn unknown_commands_reply_empty() {
        let mut engine = Engine::new();
        let out = run(&mut engine, &["FLUSHALL", "", "SET onlykey", "get a"]);
        assert_eq!(out, vec!["", "", "", ""]);
        assert_eq!(engine.stats().ignored(), 4);
        assert!(engine.is_empty());
    }

    #[test]
    fn depth_limit_ignores_extra_begin() {
        let mut engine = Engine::with_config(Config::new().max_depth(Some(1)));
        let out = run(&mut engine, &["BEGIN", "BEGIN", "SET a 1", "ROLLBACK", "GET a", "ROLLBACK"]);
        assert_eq!(out, vec!["", "", "", "", "NULL", "NO TRANSACTION"]);
        assert!(matches!(
            engine.begin().and_then(|()| engine.begin()),
            Err(CoreError::DepthLimitExceeded { limit: 1 })
        ));
    }

    #[test]
    fn stats_follow_commands() {
        let mut engine = Engine::new();
        run(
            &mut engine,
            &["SET a 1", "GET a", "UNSET a", "NUMEQUALTO 1", "BEGIN", "ROLLBACK", "COMMIT"],
        );
        let snap = engine.stats().snapshot();
        assert_eq!(snap.writes, 1);
        assert_eq!(snap.reads, 1);
        assert_eq!(snap.deletes, 1);
        assert_eq!(snap.count_queries, 1);
        assert_eq!(snap.transactions_begun, 1);
        assert_eq!(snap.transactions_rolled_back, 1);
        assert_eq!(snap.transactions_rejected, 1);
    }

    #[test]
    fn stats_can_be_disabled() {
        let mut engine = Engine::with_config(Config::new().collect_stats(false));
        run(&mut engine, &["SET a 1", "GET a", "BEGIN", "COMMIT"]);
        assert_eq!(engine.stats().snapshot().total_commands(), 0);
    }

    #[test]
    fn len_tracks_keys() {
        let mut engine = Engine::with_config(Config::new().initial_capacity(16));
        run(&mut engine, &["SET a 1", "SET b 1", "UNSET a"]);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.store().count_of("1"), 1);
        assert_eq!(engine.config().initial_capacity, 16);
    }
}

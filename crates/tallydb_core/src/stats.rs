//! Engine statistics.
//!
//! Counters for monitoring what a session did.
//!
//! # Usage
//!
//! ```rust
//! use tallydb_core::Engine;
//!
//! let mut engine = Engine::new();
//! engine.execute_line("SET a 10").unwrap();
//! engine.execute_line("GET a").unwrap();
//!
//! let stats = engine.stats().snapshot();
//! assert_eq!(stats.writes, 1);
//! assert_eq!(stats.reads, 1);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Engine operation counters.
///
/// All counters are atomic so they can be bumped from read-only paths and
/// read while a [`SharedEngine`](crate::SharedEngine) is in use elsewhere.
#[derive(Debug, Default)]
pub struct EngineStats {
    // Data counters
    /// GET commands.
    reads: AtomicU64,
    /// SET commands.
    writes: AtomicU64,
    /// UNSET commands.
    deletes: AtomicU64,
    /// NUMEQUALTO commands.
    count_queries: AtomicU64,

    // Transaction counters
    /// BEGIN commands that opened a frame.
    transactions_begun: AtomicU64,
    /// COMMIT commands that closed at least one frame.
    transactions_committed: AtomicU64,
    /// ROLLBACK commands that undid a frame.
    transactions_rolled_back: AtomicU64,
    /// COMMIT/ROLLBACK/BEGIN commands that were refused.
    transactions_rejected: AtomicU64,

    /// Unrecognized or malformed input lines.
    ignored: AtomicU64,
}

impl EngineStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_count_query(&self) {
        self.count_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.transactions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_ignored(&self) {
        self.ignored.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of GET commands.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of SET commands.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the number of UNSET commands.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the number of NUMEQUALTO commands.
    pub fn count_queries(&self) -> u64 {
        self.count_queries.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions begun.
    pub fn transactions_begun(&self) -> u64 {
        self.transactions_begun.load(Ordering::Relaxed)
    }

    /// Returns the number of successful COMMIT commands.
    ///
    /// A single COMMIT closes every open level but counts once.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the number of successful ROLLBACK commands.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the number of refused transaction commands.
    pub fn transactions_rejected(&self) -> u64 {
        self.transactions_rejected.load(Ordering::Relaxed)
    }

    /// Returns the number of ignored input lines.
    pub fn ignored(&self) -> u64 {
        self.ignored.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            writes: self.writes(),
            deletes: self.deletes(),
            count_queries: self.count_queries(),
            transactions_begun: self.transactions_begun(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
            transactions_rejected: self.transactions_rejected(),
            ignored: self.ignored(),
        }
    }
}

/// A point-in-time copy of [`EngineStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// GET commands.
    pub reads: u64,
    /// SET commands.
    pub writes: u64,
    /// UNSET commands.
    pub deletes: u64,
    /// NUMEQUALTO commands.
    pub count_queries: u64,
    /// Transactions begun.
    pub transactions_begun: u64,
    /// Successful COMMIT commands.
    pub transactions_committed: u64,
    /// Successful ROLLBACK commands.
    pub transactions_rolled_back: u64,
    /// Refused transaction commands.
    pub transactions_rejected: u64,
    /// Ignored input lines.
    pub ignored: u64,
}

impl StatsSnapshot {
    /// Returns the total number of commands counted.
    pub fn total_commands(&self) -> u64 {
        self.reads
            + self.writes
            + self.deletes
            + self.count_queries
            + self.transactions_begun
            + self.transactions_committed
            + self.transactions_rolled_back
            + self.transactions_rejected
            + self.ignored
    }
}

//! # TallyDB Core
//!
//! Transactional key-value engine for TallyDB.
//!
//! This crate provides:
//! - A string key → value [`Store`] with a [`ReverseIndex`] answering
//!   "how many keys hold this value" in O(1)
//! - Nested transactions built from undo frames ([`TransactionStack`])
//! - The command [`Engine`] and its textual [`Command`] / [`Reply`] forms
//! - A line-oriented [`Session`] runner and a lock-guarded [`SharedEngine`]
//!
//! ## Example
//!
//! ```rust
//! use tallydb_core::{Engine, Reply};
//!
//! let mut engine = Engine::new();
//! engine.execute_line("SET a 10").unwrap();
//! engine.execute_line("SET b 10").unwrap();
//! assert_eq!(engine.execute_line("NUMEQUALTO 10").unwrap(), Reply::Count(2));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod engine;
mod error;
mod index;
mod reply;
mod session;
mod shared;
mod stats;
mod store;
mod transaction;

pub use command::Command;
pub use config::{Config, DEFAULT_TERMINATOR};
pub use engine::Engine;
pub use error::{CoreError, CoreResult};
pub use index::ReverseIndex;
pub use reply::{Reply, NO_TRANSACTION_REPLY, NULL_REPLY};
pub use session::{Session, SessionSummary};
pub use shared::SharedEngine;
pub use stats::{EngineStats, StatsSnapshot};
pub use store::Store;
pub use transaction::{PriorState, TransactionStack, UndoFrame};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

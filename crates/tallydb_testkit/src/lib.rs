//! # TallyDB Testkit
//!
//! Test utilities for TallyDB.
//!
//! This crate provides:
//! - Script fixtures for driving an engine from command text
//! - Property-based command generators using proptest
//! - A snapshot-based reference model to check engine replies against
//! - Literal transcript vectors
//! - Stress testing utilities
//!
//! ## Usage
//!
//! ```rust
//! use tallydb_testkit::prelude::*;
//!
//! let out = run_script(&["SET a 1", "GET a"]);
//! assert_eq!(out, ["", "1"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;
pub mod stress;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::stress::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
pub use stress::*;
pub use vectors::*;

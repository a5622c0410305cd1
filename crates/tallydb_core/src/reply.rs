//! Command replies.

use std::fmt;

/// Wire text for a missing key.
pub const NULL_REPLY: &str = "NULL";

/// Wire text for COMMIT/ROLLBACK without an open transaction.
pub const NO_TRANSACTION_REPLY: &str = "NO TRANSACTION";

/// The result of executing one command.
///
/// `Display` renders the exact output line (without the newline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Empty line.
    Empty,
    /// A stored value.
    Value(String),
    /// The key is not set.
    Null,
    /// Number of keys holding a value.
    Count(usize),
    /// COMMIT or ROLLBACK with no open transaction.
    NoTransaction,
}

impl Reply {
    /// Returns true for the empty reply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Option<&str>> for Reply {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::Value(v.to_string()),
            None => Self::Null,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Value(value) => f.write_str(value),
            Self::Null => f.write_str(NULL_REPLY),
            Self::Count(count) => write!(f, "{count}"),
            Self::NoTransaction => f.write_str(NO_TRANSACTION_REPLY),
        }
    }
}

//! Command parsing.

use std::fmt;

/// One parsed input command.
///
/// Keys and values are opaque, whitespace-free strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET key value`
    Set {
        /// Target key.
        key: String,
        /// New value.
        value: String,
    },
    /// `UNSET key`
    Unset {
        /// Target key.
        key: String,
    },
    /// `GET key`
    Get {
        /// Key to read.
        key: String,
    },
    /// `NUMEQUALTO value`
    NumEqualTo {
        /// Value to count.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// Anything unrecognized or missing operands; answered with an empty reply.
    Ignored(String),
}

impl Command {
    /// Parses one input line.
    ///
    /// The first whitespace-separated token selects the command and is
    /// matched case-sensitively. Extra trailing operands are ignored; missing
    /// operands yield [`Command::Ignored`].
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let parsed = match tokens.next() {
            Some("SET") => match (tokens.next(), tokens.next()) {
                (Some(key), Some(value)) => Some(Self::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
                _ => None,
            },
            Some("UNSET") => tokens.next().map(|key| Self::Unset {
                key: key.to_string(),
            }),
            Some("GET") => tokens.next().map(|key| Self::Get {
                key: key.to_string(),
            }),
            Some("NUMEQUALTO") => tokens.next().map(|value| Self::NumEqualTo {
                value: value.to_string(),
            }),
            Some("BEGIN") => Some(Self::Begin),
            Some("COMMIT") => Some(Self::Commit),
            Some("ROLLBACK") => Some(Self::Rollback),
            _ => None,
        };
        parsed.unwrap_or_else(|| Self::Ignored(line.to_string()))
    }

    /// Returns true if the command can change the store.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Set { .. } | Self::Unset { .. })
    }

    /// Returns the command keyword, or `None` for ignored input.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Set { .. } => Some("SET"),
            Self::Unset { .. } => Some("UNSET"),
            Self::Get { .. } => Some("GET"),
            Self::NumEqualTo { .. } => Some("NUMEQUALTO"),
            Self::Begin => Some("BEGIN"),
            Self::Commit => Some("COMMIT"),
            Self::Rollback => Some("ROLLBACK"),
            Self::Ignored(_) => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { key, value } => write!(f, "SET {key} {value}"),
            Self::Unset { key } => write!(f, "UNSET {key}"),
            Self::Get { key } => write!(f, "GET {key}"),
            Self::NumEqualTo { value } => write!(f, "NUMEQUALTO {value}"),
            Self::Begin => f.write_str("BEGIN"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),
            Self::Ignored(raw) => f.write_str(raw),
        }
    }
}

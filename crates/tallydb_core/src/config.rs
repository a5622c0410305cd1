//! Engine and session configuration.

/// Default session terminator line.
pub const DEFAULT_TERMINATOR: &str = "END";

/// Configuration for an engine session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of keys to pre-size the store and reverse index for.
    pub initial_capacity: usize,

    /// Maximum number of nested open transactions (`None` = unlimited).
    pub max_depth: Option<usize>,

    /// Input line that ends a session.
    pub terminator: String,

    /// Whether the engine records operation counters.
    pub collect_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            max_depth: None,
            terminator: DEFAULT_TERMINATOR.to_string(),
            collect_stats: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial key capacity.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Caps transaction nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the session terminator line.
    #[must_use]
    pub fn terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    /// Sets whether operation counters are recorded.
    #[must_use]
    pub const fn collect_stats(mut self, value: bool) -> Self {
        self.collect_stats = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.terminator, "END");
        assert!(config.collect_stats);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .initial_capacity(1024)
            .max_depth(Some(8))
            .terminator("QUIT")
            .collect_stats(false);

        assert_eq!(config.initial_capacity, 1024);
        assert_eq!(config.max_depth, Some(8));
        assert_eq!(config.terminator, "QUIT");
        assert!(!config.collect_stats);
    }
}

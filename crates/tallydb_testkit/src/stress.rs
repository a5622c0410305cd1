//! Stress tests for TallyDB.
//!
//! These helpers drive large command volumes through an engine, either
//! directly or through a [`SharedEngine`] from several threads.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use tallydb_core::{Engine, Reply, SharedEngine};

/// What a stress run did to the engine.
#[derive(Debug, Clone, Default)]
pub struct StressReport {
    /// Commands the engine accepted.
    pub commands: usize,
    /// Commands that returned an engine error.
    pub failures: usize,
    /// Successful COMMIT calls.
    pub commits: usize,
    /// Successful ROLLBACK calls.
    pub rollbacks: usize,
    /// Deepest transaction nesting reached.
    pub max_depth: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl StressReport {
    /// Commands per second, or zero for an instantaneous run.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.commands + self.failures) as f64 / secs
        } else {
            0.0
        }
    }

    fn tally<T, E>(&mut self, result: Result<T, E>) -> bool {
        match result {
            Ok(_) => {
                self.commands += 1;
                true
            }
            Err(_) => {
                self.failures += 1;
                false
            }
        }
    }
}

impl fmt::Display for StressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} commands ({} failed), {} commits, {} rollbacks, max depth {}, {:.0} cmd/s",
            self.commands,
            self.failures,
            self.commits,
            self.rollbacks,
            self.max_depth,
            self.throughput()
        )
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of operations to perform (per thread for concurrent tests).
    pub operations: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Number of distinct keys.
    pub key_count: usize,
    /// Number of distinct values.
    pub value_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 10_000,
            threads: 4,
            key_count: 1_000,
            value_count: 16,
        }
    }
}

/// Run sequential SET/UNSET traffic in autocommit mode.
pub fn stress_autocommit(engine: &mut Engine, config: &StressConfig) -> StressReport {
    let start = Instant::now();
    let mut report = StressReport::default();

    for i in 0..config.operations {
        let key = format!("k{}", i % config.key_count);
        let result = if i % 5 == 4 {
            engine.unset(&key)
        } else {
            engine.set(&key, &format!("v{}", i % config.value_count))
        };
        report.tally(result);
    }

    report.elapsed = start.elapsed();
    report
}

/// Run writes inside repeatedly nested transactions, rolling every other
/// batch back and committing whatever is left open at the end.
pub fn stress_nested_transactions(engine: &mut Engine, config: &StressConfig) -> StressReport {
    let start = Instant::now();
    let mut report = StressReport::default();
    let batch = 8;

    for i in 0..config.operations {
        if i % batch == 0 && !report.tally(engine.begin()) {
            continue;
        }
        report.max_depth = report.max_depth.max(engine.depth());

        let key = format!("k{}", i % config.key_count);
        report.tally(engine.set(&key, &format!("v{}", i % config.value_count)));

        if i % batch == batch - 1 && (i / batch) % 2 == 1 && report.tally(engine.rollback()) {
            report.rollbacks += 1;
        }
    }

    if engine.in_transaction() && report.tally(engine.commit()) {
        report.commits += 1;
    }

    report.elapsed = start.elapsed();
    report
}

/// Run concurrent traffic from `config.threads` threads through one
/// shared engine.
///
/// Every thread wraps its writes in short BEGIN/ROLLBACK or BEGIN/COMMIT
/// pairs; the lock makes each command atomic but transactions remain
/// engine-wide, so a COMMIT from one thread may close another's frames.
pub fn stress_concurrent(shared: &SharedEngine, config: &StressConfig) -> StressReport {
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let shared = shared.clone();
            let config = config.clone();
            thread::spawn(move || {
                let mut report = StressReport::default();
                for i in 0..config.operations {
                    let key = format!("k{}", (i * (t + 1)) % config.key_count);
                    let line = match i % 6 {
                        0 => "BEGIN".to_string(),
                        1 | 2 => format!("SET {key} v{}", i % config.value_count),
                        3 => format!("GET {key}"),
                        4 => format!("UNSET {key}"),
                        _ if t % 2 == 0 => "ROLLBACK".to_string(),
                        _ => "COMMIT".to_string(),
                    };
                    match shared.execute_line(&line) {
                        Ok(Reply::Empty) if line == "ROLLBACK" => {
                            report.commands += 1;
                            report.rollbacks += 1;
                        }
                        Ok(Reply::Empty) if line == "COMMIT" => {
                            report.commands += 1;
                            report.commits += 1;
                        }
                        result => {
                            report.tally(result);
                        }
                    }
                }
                report
            })
        })
        .collect();

    let mut total = StressReport::default();
    for handle in handles {
        match handle.join() {
            Ok(report) => {
                total.commands += report.commands;
                total.failures += report.failures;
                total.commits += report.commits;
                total.rollbacks += report.rollbacks;
            }
            Err(_) => total.failures += 1,
        }
    }

    total.elapsed = start.elapsed();
    total
}

//! Run command implementation.

use crate::RunArgs;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tallydb_core::{Config, Session, StatsSnapshot};
use tracing::info;

/// Builds the engine configuration from command-line options.
pub fn config_from_args(args: &RunArgs) -> Config {
    Config::new()
        .initial_capacity(args.capacity)
        .max_depth(args.max_depth)
        .terminator(args.terminator.clone())
        .collect_stats(args.stats)
}

/// Runs the session command.
pub fn run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::with_config(config_from_args(args));
    let stdout = io::stdout();

    let summary = match &args.input {
        Some(path) => {
            info!(path = %path.display(), "reading commands from file");
            let file = File::open(path)
                .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
            session.run(BufReader::new(file), stdout.lock())?
        }
        None => session.run(io::stdin().lock(), stdout.lock())?,
    };

    if summary.terminated {
        info!(commands = summary.commands, "session ended by terminator");
    }

    if args.stats {
        let snapshot = session.engine().stats().snapshot();
        let mut stderr = io::stderr().lock();
        write_stats(&mut stderr, &snapshot, &args.format)?;
    }

    Ok(())
}

/// Writes a stats snapshot in the requested format.
pub fn write_stats<W: Write>(
    out: &mut W,
    stats: &StatsSnapshot,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(stats)?)?;
        }
        _ => {
            writeln!(out, "=== TallyDB Session Stats ===")?;
            writeln!(out, "GET:          {}", stats.reads)?;
            writeln!(out, "SET:          {}", stats.writes)?;
            writeln!(out, "UNSET:        {}", stats.deletes)?;
            writeln!(out, "NUMEQUALTO:   {}", stats.count_queries)?;
            writeln!(out, "BEGIN:        {}", stats.transactions_begun)?;
            writeln!(out, "COMMIT:       {}", stats.transactions_committed)?;
            writeln!(out, "ROLLBACK:     {}", stats.transactions_rolled_back)?;
            writeln!(out, "Rejected:     {}", stats.transactions_rejected)?;
            writeln!(out, "Ignored:      {}", stats.ignored)?;
            writeln!(out, "Total:        {}", stats.total_commands())?;
        }
    }
    Ok(())
}

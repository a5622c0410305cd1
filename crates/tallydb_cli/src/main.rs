//! TallyDB CLI
//!
//! Runs a TallyDB command session over stdin or a script file.
//!
//! # Commands
//!
//! - `run` - Execute commands until `END` or end of input (default)
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// TallyDB transactional key-value session.
#[derive(Parser)]
#[command(name = "tallydb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

/// Options for a command session.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print operation counters to stderr when the session ends
    #[arg(short, long)]
    pub stats: bool,

    /// Stats output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Maximum nested transaction depth (unlimited if omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Line that ends the session
    #[arg(long, default_value = tallydb_core::DEFAULT_TERMINATOR)]
    pub terminator: String,

    /// Number of keys to pre-allocate
    #[arg(long, default_value = "0")]
    pub capacity: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute commands until the terminator or end of input
    Run(RunArgs),

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries replies only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Run(args)) => commands::run::run(&args)?,
        None => commands::run::run(&cli.run)?,
        Some(Commands::Version) => {
            println!("TallyDB CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("TallyDB Core v{}", tallydb_core::VERSION);
        }
    }

    Ok(())
}

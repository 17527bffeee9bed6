//! Checkers CLI - Command-line interface
//!
//! Commands:
//! - match: Play AI-vs-AI games between two difficulty tiers
//! - bench: Time engine searches from the opening

mod bench_cmd;
mod match_cmd;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkers_core::DifficultyTable;

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Checkers rules engine and alpha-beta AI")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file overriding the difficulty table
    #[arg(long, global = true, value_name = "FILE")]
    limits: Option<PathBuf>,

    /// Log search details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play AI-vs-AI games
    Match(match_cmd::MatchArgs),
    /// Benchmark engine searches
    Bench(bench_cmd::BenchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let table = load_limits(cli.limits.as_deref())?;

    match cli.command {
        Commands::Match(args) => match_cmd::run(args, &table, cli.seed),
        Commands::Bench(args) => bench_cmd::run(args, &table, cli.seed),
    }
}

/// Logs go to stderr so JSON reports on stdout stay parseable
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_limits(path: Option<&Path>) -> Result<DifficultyTable> {
    match path {
        Some(path) => DifficultyTable::load(path)
            .with_context(|| format!("Failed to load difficulty table: {}", path.display())),
        None => Ok(DifficultyTable::default()),
    }
}

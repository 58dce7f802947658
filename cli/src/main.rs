//! Morphbpe CLI - Command-line interface for BPE vocabulary learning.
//!
//! This is the main entry point for the `morphbpe` command-line tool.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{InspectCommand, TrainCommand};
use env_logger::Env;

#[derive(Parser)]
#[command(name = "morphbpe")]
#[command(about = "Learn a BPE subword vocabulary from text", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease log verbosity (-q warn, -qq error)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn merges from a text corpus
    Train(TrainCommand),
    /// Summarize a trained model
    Inspect(InspectCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd)?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    // Without -v/-q, RUST_LOG (or the "info" default) decides.
    if let Some(level) = level_override(verbose, quiet) {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

/// Level forced by the -v/-q flags, if any were given.
fn level_override(verbose: u8, quiet: u8) -> Option<log::LevelFilter> {
    use log::LevelFilter;

    match (verbose, quiet) {
        (0, 0) => None,
        (_, 1) => Some(LevelFilter::Warn),
        (_, q) if q > 1 => Some(LevelFilter::Error),
        (1, _) => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_no_flags_defer_to_environment() {
        assert_eq!(level_override(0, 0), None);
    }

    #[test]
    fn test_flags_override_level() {
        assert_eq!(level_override(1, 0), Some(LevelFilter::Debug));
        assert_eq!(level_override(3, 0), Some(LevelFilter::Trace));
        assert_eq!(level_override(0, 1), Some(LevelFilter::Warn));
        assert_eq!(level_override(0, 2), Some(LevelFilter::Error));
        // Quiet wins over verbose.
        assert_eq!(level_override(2, 1), Some(LevelFilter::Warn));
    }
}

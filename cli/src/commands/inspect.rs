//! Inspect command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Inspect command arguments.
#[derive(Parser)]
pub struct InspectCommand {
    /// Directory containing a trained model
    #[arg(short, long)]
    pub model: PathBuf,

    /// Number of merges and entries to list
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,
}

use anyhow::{Context, Result as AnyhowResult};
use morphbpe::BpeModel;

pub fn run(cmd: InspectCommand) -> AnyhowResult<()> {
    let model = BpeModel::load(&cmd.model)
        .with_context(|| format!("failed to load model from {}", cmd.model.display()))?;
    let stats = model.merges().stats();

    println!("Model: {}", cmd.model.display());
    println!("  End-of-word marker: {}", model.eow_symbol());
    println!(
        "  Stop reason: {}",
        model
            .stop_reason()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "untrained".to_string())
    );
    println!("  Merges: {}", stats.count);
    if stats.count > 0 {
        println!(
            "  Merge frequency range: {}..={}",
            stats.min_count, stats.max_count
        );
    }
    println!("  Symbols: {}", model.symbol_count());
    println!("  Entries: {}", model.vocab().len());
    println!("  Word occurrences: {}", model.vocab().total_frequency());
    println!();

    println!("First {} merges:", cmd.top.min(stats.count));
    for (rank, step) in model.merges().iter().take(cmd.top).enumerate() {
        println!(
            "  {:>6}  {} {}  ({})",
            rank, step.pair.0, step.pair.1, step.count
        );
    }
    println!();

    let entries = model.vocab().sorted_entries();
    println!("Top {} entries:", cmd.top.min(entries.len()));
    for (key, frequency) in entries.into_iter().take(cmd.top) {
        println!("  {:>8}  {}", frequency, key);
    }

    Ok(())
}

//! Train command implementation.

use clap::Parser;
use morphbpe::TieBreak;
use std::path::PathBuf;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training corpus (one sentence per line)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the trained model
    #[arg(short, long)]
    pub output: PathBuf,

    /// JSON training configuration; flags below override its fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop once this many distinct symbols exist
    #[arg(long)]
    pub vocab_size: Option<usize>,

    /// Stop after this many merges
    #[arg(short, long)]
    pub max_merges: Option<usize>,

    /// Keep merging until every word is a single symbol
    #[arg(long, conflicts_with = "max_merges", default_value_t = false)]
    pub until_converged: bool,

    /// Stop when the best pair occurs fewer times than this
    #[arg(long)]
    pub min_frequency: Option<u64>,

    /// End-of-word marker
    #[arg(long)]
    pub eow: Option<String>,

    /// Tie-break policy for equally frequent pairs (lexicographic, reverse-lexicographic)
    #[arg(long)]
    pub tie_break: Option<TieBreak>,

    /// Disable parallel scoring and merging
    #[arg(long, default_value_t = false)]
    pub no_parallel: bool,

    /// Number of worker threads for parallel processing
    #[arg(long)]
    pub threads: Option<usize>,

    /// Also write merges.txt and vocab.txt
    #[arg(long, default_value_t = false)]
    pub text: bool,
}

use anyhow::{Context, Result as AnyhowResult};
use morphbpe::{BpeModel, ModelFormat, TrainingConfig};
use std::time::Instant;

impl TrainCommand {
    /// Resolve the training configuration from the config file and flags.
    pub fn training_config(&self) -> AnyhowResult<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => TrainingConfig::default(),
        };

        if let Some(vocab_size) = self.vocab_size {
            config.vocab_size = Some(vocab_size);
        }
        if self.until_converged {
            config.max_merges = None;
        } else if let Some(max_merges) = self.max_merges {
            config.max_merges = Some(max_merges);
        }
        if let Some(min_frequency) = self.min_frequency {
            config.min_frequency = min_frequency;
        }
        if let Some(eow) = &self.eow {
            config.eow_symbol = eow.clone();
        }
        if let Some(tie_break) = self.tie_break {
            config.tie_break = tie_break;
        }
        if self.no_parallel {
            config.parallel = false;
        }

        Ok(config)
    }
}

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    if let Some(threads) = cmd.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("unable to configure thread pool")?;
    }

    let config = cmd.training_config()?;
    log::info!("Input: {}", cmd.input.display());
    log::info!("Output: {}", cmd.output.display());
    log::info!("Configuration: {}", serde_json::to_string(&config)?);

    let mut model = BpeModel::builder()
        .config(config)
        .build()
        .context("invalid training configuration")?;

    let start = Instant::now();
    model
        .train_file(&cmd.input)
        .with_context(|| format!("training on {} failed", cmd.input.display()))?;
    log::info!(
        "Training completed in {:.2}s: {} merges, {} symbols ({})",
        start.elapsed().as_secs_f64(),
        model.merges().len(),
        model.symbol_count(),
        model
            .stop_reason()
            .map(|r| r.to_string())
            .unwrap_or_default()
    );

    let start = Instant::now();
    let mut formats = vec![ModelFormat::Json];
    if cmd.text {
        formats.push(ModelFormat::Text);
    }
    for model_format in formats {
        model.save_as(&cmd.output, model_format).with_context(|| {
            format!("failed to save {:?} model to {}", model_format, cmd.output.display())
        })?;
    }
    log::info!(
        "Model saved to {} in {:.2}s",
        cmd.output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

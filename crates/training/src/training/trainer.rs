//! BPE trainer implementation.
//!
//! The trainer drives a [`VocabularyBuilder`] through the greedy merge loop:
//! select the best candidate, merge it everywhere, record the step, and
//! repeat until a stopping condition holds.

use super::builder::VocabularyBuilder;
use morphbpe_core::{
    MergeList, MergeStep, Result, TieBreak, TokenizerError, WordVocab, DEFAULT_EOW,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::path::Path;

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Stop once the symbol-type count reaches this size
    pub vocab_size: Option<usize>,
    /// Stop after this many merges
    pub max_merges: Option<usize>,
    /// Stop when the best candidate scores below this frequency
    pub min_frequency: u64,
    /// Whether to use parallel processing
    pub parallel: bool,
    /// Policy for equally scored candidates
    pub tie_break: TieBreak,
    /// End-of-word marker
    pub eow_symbol: String,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: None,
            max_merges: Some(10_000),
            min_frequency: 1,
            parallel: true,
            tie_break: TieBreak::default(),
            eow_symbol: DEFAULT_EOW.to_string(),
        }
    }
}

impl TrainingConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        Self::from_json(&json)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        morphbpe_core::validate_eow(&self.eow_symbol)?;
        if self.vocab_size == Some(0) {
            return Err(TokenizerError::InvalidConfig(
                "vocab_size must be greater than zero".to_string(),
            ));
        }
        if self.max_merges == Some(0) {
            return Err(TokenizerError::InvalidConfig(
                "max_merges must be greater than zero; use None to train until convergence"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Why the training loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// `max_merges` merges were applied
    MaxMerges,
    /// The symbol-type count reached `vocab_size`
    VocabSize,
    /// The best candidate scored below `min_frequency`
    MinFrequency,
    /// Every entry is a single symbol; nothing is left to merge
    Converged,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::MaxMerges => "reached maximum merge count",
            StopReason::VocabSize => "reached target vocabulary size",
            StopReason::MinFrequency => "best pair below minimum frequency",
            StopReason::Converged => "converged",
        };
        f.write_str(s)
    }
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Final word vocabulary
    pub vocab: WordVocab,
    /// Merges in the order they were applied
    pub merges: MergeList,
    /// Symbol-type count of the final vocabulary
    pub symbol_count: usize,
    /// Why training stopped
    pub stop_reason: StopReason,
}

/// BPE trainer.
///
/// Learns an ordered list of merges by repeatedly merging the most frequent
/// adjacent symbol pair.
#[derive(Debug, Clone)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
    /// Vocabulary operations
    builder: VocabularyBuilder,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let builder = VocabularyBuilder::new(&config.eow_symbol)?
            .with_tie_break(config.tie_break)
            .with_parallel(config.parallel);
        Ok(Self { config, builder })
    }

    /// Create a trainer that stops after `max_merges` merges.
    pub fn with_max_merges(max_merges: usize) -> Self {
        let config = TrainingConfig {
            max_merges: Some(max_merges),
            ..Default::default()
        };
        Self {
            builder: VocabularyBuilder::default().with_parallel(config.parallel),
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Get the vocabulary builder.
    pub fn builder(&self) -> &VocabularyBuilder {
        &self.builder
    }

    /// Train on lines of text.
    pub fn train_lines<I, S>(&self, lines: I) -> Result<TrainingOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.train_vocab(self.builder.initialize(lines))
    }

    /// Train on text read from a buffered reader.
    pub fn train_reader<R: BufRead>(&self, reader: R) -> Result<TrainingOutcome> {
        self.train_vocab(self.builder.initialize_from_reader(reader)?)
    }

    /// Train on a text file.
    pub fn train_path(&self, path: impl AsRef<Path>) -> Result<TrainingOutcome> {
        self.train_vocab(self.builder.initialize_from_path(path)?)
    }

    /// Run the merge loop on an initialized vocabulary.
    pub fn train_vocab(&self, vocab: WordVocab) -> Result<TrainingOutcome> {
        let total_frequency = vocab.total_frequency();
        let mut symbol_count = vocab.symbol_type_count();
        let mut merges = MergeList::with_capacity(self.config.max_merges.unwrap_or(0).min(1 << 16));
        let mut vocab = vocab;

        log::info!(
            "Starting BPE training: {} entries, {} word occurrences, {} symbols",
            vocab.len(),
            total_frequency,
            symbol_count
        );

        let mut last_log_percent = 0;

        let stop_reason = loop {
            if let Some(max_merges) = self.config.max_merges {
                if merges.len() >= max_merges {
                    break StopReason::MaxMerges;
                }
            }
            if let Some(target) = self.config.vocab_size {
                if symbol_count >= target {
                    break StopReason::VocabSize;
                }
            }

            let iteration = merges.len();
            let candidate = match self.builder.select_best_candidate(&vocab) {
                Ok(candidate) => candidate,
                Err(TokenizerError::EmptyVocabulary) => break StopReason::Converged,
                Err(e) => {
                    return Err(TokenizerError::Training(format!(
                        "select_best_candidate failed at iteration {}: {}",
                        iteration, e
                    )))
                }
            };

            if candidate.count < self.config.min_frequency {
                break StopReason::MinFrequency;
            }

            let (next, count) = self.builder.merge_candidate(vocab, &candidate.pair);
            vocab = next;
            symbol_count = count;

            log::debug!(
                "Merge {}: {:?} + {:?} (frequency: {}, symbols: {})",
                iteration,
                candidate.left(),
                candidate.right(),
                candidate.count,
                symbol_count
            );

            merges.push(MergeStep {
                pair: candidate.pair,
                count: candidate.count,
                symbol_count,
            });

            self.log_progress(merges.len(), &mut last_log_percent);
        };

        debug_assert_eq!(vocab.total_frequency(), total_frequency);

        log::info!(
            "Finished BPE training after {} merges ({}): {} entries, {} symbols",
            merges.len(),
            stop_reason,
            vocab.len(),
            symbol_count
        );

        Ok(TrainingOutcome {
            vocab,
            merges,
            symbol_count,
            stop_reason,
        })
    }

    fn log_progress(&self, merges_done: usize, last_log_percent: &mut usize) {
        match self.config.max_merges {
            Some(max_merges) if max_merges > 0 => {
                let current_percent = merges_done * 100 / max_merges;
                if current_percent > *last_log_percent {
                    log::info!(
                        "Progress: {}% ({}/{} merges)",
                        current_percent,
                        merges_done,
                        max_merges
                    );
                    *last_log_percent = current_percent;
                }
            }
            _ => {
                if merges_done % 1000 == 0 {
                    log::info!("Progress: {} merges", merges_done);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphbpe_core::pair;

    fn config() -> TrainingConfig {
        TrainingConfig {
            parallel: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_training() {
        let trainer = BpeTrainer::new(TrainingConfig {
            max_merges: Some(3),
            ..config()
        })
        .unwrap();

        let outcome = trainer.train_lines(["low low low", "lower newest widest"]).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::MaxMerges);
        assert_eq!(outcome.merges.len(), 3);
        assert_eq!(outcome.vocab.total_frequency(), 6);

        // (l, o) wins its tie with (o, w) lexicographically.
        let pairs: Vec<_> = outcome.merges.pairs().cloned().collect();
        assert_eq!(pairs[0], pair("l", "o"));
        assert_eq!(pairs[1], pair("lo", "w"));
        assert_eq!(pairs[2], pair("low", "_EOW"));
        assert_eq!(outcome.vocab.get("low_EOW"), Some(3));
        assert_eq!(outcome.vocab.get("low e r _EOW"), Some(1));
    }

    #[test]
    fn test_symbol_count_recorded() {
        let trainer = BpeTrainer::new(TrainingConfig {
            max_merges: Some(2),
            ..config()
        })
        .unwrap();

        let outcome = trainer.train_lines(["ab ab ab cd"]).unwrap();
        let last = outcome.merges.last().unwrap();
        assert_eq!(last.symbol_count, outcome.symbol_count);
        assert_eq!(outcome.symbol_count, outcome.vocab.symbol_type_count());
    }

    #[test]
    fn test_training_converges() {
        let trainer = BpeTrainer::new(TrainingConfig {
            max_merges: None,
            ..config()
        })
        .unwrap();

        let outcome = trainer.train_lines(["low lower", "low"]).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::Converged);
        assert_eq!(outcome.vocab.get("low_EOW"), Some(2));
        assert_eq!(outcome.vocab.get("lower_EOW"), Some(1));
        assert_eq!(outcome.symbol_count, 2);
    }

    #[test]
    fn test_min_frequency_stops_training() {
        let trainer = BpeTrainer::new(TrainingConfig {
            min_frequency: 3,
            ..config()
        })
        .unwrap();

        let outcome = trainer.train_lines(["ab ab ab xy"]).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::MinFrequency);
        assert!(outcome.merges.iter().all(|step| step.count >= 3));
        assert_eq!(outcome.vocab.get("xy _EOW"), None);
        assert_eq!(outcome.vocab.get("x y _EOW"), Some(1));
    }

    #[test]
    fn test_vocab_size_target() {
        let trainer = BpeTrainer::new(TrainingConfig {
            vocab_size: Some(4),
            max_merges: None,
            ..config()
        })
        .unwrap();

        // Initial symbols are a, b and _EOW; merging (a, b) keeps a and b
        // alive through "ba" and adds "ab".
        let outcome = trainer.train_lines(["ab ab ba"]).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::VocabSize);
        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(outcome.symbol_count, 4);
    }

    #[test]
    fn test_vocab_size_already_reached() {
        let trainer = BpeTrainer::new(TrainingConfig {
            vocab_size: Some(2),
            ..config()
        })
        .unwrap();

        let outcome = trainer.train_lines(["abc"]).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::VocabSize);
        assert!(outcome.merges.is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let trainer = BpeTrainer::with_max_merges(10);
        let outcome = trainer.train_lines(Vec::<String>::new()).unwrap();

        assert_eq!(outcome.stop_reason, StopReason::Converged);
        assert!(outcome.vocab.is_empty());
        assert_eq!(outcome.symbol_count, 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let lines = [
            "the quick brown fox jumps over the lazy dog",
            "the lazy dog sleeps while the quick fox runs",
            "newest widest lowest",
        ];

        let sequential = BpeTrainer::new(TrainingConfig {
            max_merges: Some(25),
            ..config()
        })
        .unwrap()
        .train_lines(lines)
        .unwrap();
        let parallel = BpeTrainer::new(TrainingConfig {
            max_merges: Some(25),
            parallel: true,
            ..config()
        })
        .unwrap()
        .train_lines(lines)
        .unwrap();

        assert_eq!(sequential.vocab, parallel.vocab);
        let a: Vec<_> = sequential.merges.iter().collect();
        let b: Vec<_> = parallel.merges.iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_from_json() {
        let config = TrainingConfig::from_json(
            r#"{"max_merges": 50, "tie_break": "reverse-lexicographic", "eow_symbol": "</w>"}"#,
        )
        .unwrap();

        assert_eq!(config.max_merges, Some(50));
        assert_eq!(config.tie_break, TieBreak::ReverseLexicographic);
        assert_eq!(config.eow_symbol, "</w>");
        assert_eq!(config.min_frequency, 1);
        assert!(config.parallel);
    }

    #[test]
    fn test_invalid_config() {
        assert!(BpeTrainer::new(TrainingConfig {
            eow_symbol: "x".to_string(),
            ..config()
        })
        .is_err());
        assert!(BpeTrainer::new(TrainingConfig {
            vocab_size: Some(0),
            ..config()
        })
        .is_err());
        assert!(matches!(
            BpeTrainer::new(TrainingConfig {
                max_merges: Some(0),
                ..config()
            }),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unbounded_config_trains_to_convergence() {
        let trainer = BpeTrainer::new(TrainingConfig {
            max_merges: None,
            vocab_size: None,
            ..config()
        })
        .unwrap();

        let outcome = trainer.train_lines(["ab ab ba"]).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::Converged);
        assert!(outcome.vocab.iter().all(|(key, _)| !key.contains(' ')));
    }
}

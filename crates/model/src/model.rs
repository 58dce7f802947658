//! Trained BPE model.
//!
//! This module provides the high-level `BpeModel` struct that ties a training
//! configuration to the vocabulary and merge list it produced.

use crate::io::{ModelFormat, ModelLoader, ModelSaver};
use morphbpe_core::{MergeList, Result, TieBreak, WordVocab};
use morphbpe_training::{BpeTrainer, StopReason, TrainingConfig, TrainingOutcome};
use std::io::BufRead;
use std::path::Path;

/// Builder for creating a model.
#[derive(Debug, Clone, Default)]
pub struct BpeModelBuilder {
    config: TrainingConfig,
}

impl BpeModelBuilder {
    /// Create a new model builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: TrainingConfig::default(),
        }
    }

    /// Start from an existing training configuration.
    pub fn config(mut self, config: TrainingConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the target symbol-type count.
    pub fn vocab_size(mut self, size: Option<usize>) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set the maximum number of merges.
    pub fn max_merges(mut self, merges: Option<usize>) -> Self {
        self.config.max_merges = merges;
        self
    }

    /// Set the minimum pair frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Enable or disable parallel processing.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the tie-break policy.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    /// Set the end-of-word marker.
    pub fn eow_symbol(mut self, eow: impl Into<String>) -> Self {
        self.config.eow_symbol = eow.into();
        self
    }

    /// Build the model.
    pub fn build(self) -> Result<BpeModel> {
        BpeModel::new(self.config)
    }
}

/// A BPE model: training configuration, learned merges and final vocabulary.
#[derive(Debug, Clone)]
pub struct BpeModel {
    /// Configuration
    config: TrainingConfig,
    /// Final word vocabulary
    vocab: WordVocab,
    /// Learned merges in rank order
    merges: MergeList,
    /// Why training stopped, once trained
    stop_reason: Option<StopReason>,
}

impl BpeModel {
    /// Create an untrained model with the given configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            vocab: WordVocab::new(),
            merges: MergeList::new(),
            stop_reason: None,
        })
    }

    /// Create a model builder.
    pub fn builder() -> BpeModelBuilder {
        BpeModelBuilder::new()
    }

    /// Assemble a model from already-learned parts.
    pub fn from_parts(
        config: TrainingConfig,
        vocab: WordVocab,
        merges: MergeList,
        stop_reason: Option<StopReason>,
    ) -> Self {
        Self {
            config,
            vocab,
            merges,
            stop_reason,
        }
    }

    fn trainer(&self) -> Result<BpeTrainer> {
        BpeTrainer::new(self.config.clone())
    }

    fn apply(&mut self, outcome: TrainingOutcome) {
        self.vocab = outcome.vocab;
        self.merges = outcome.merges;
        self.stop_reason = Some(outcome.stop_reason);
    }

    /// Train the model on text data, one sentence per line.
    ///
    /// Any previous training result is replaced.
    pub fn train(&mut self, data: &str) -> Result<()> {
        self.train_lines(data.lines())
    }

    /// Train the model on lines of text.
    pub fn train_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let outcome = self.trainer()?.train_lines(lines)?;
        self.apply(outcome);
        Ok(())
    }

    /// Train the model on text from a buffered reader.
    pub fn train_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let outcome = self.trainer()?.train_reader(reader)?;
        self.apply(outcome);
        Ok(())
    }

    /// Train the model on a text file.
    pub fn train_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let outcome = self.trainer()?.train_path(path)?;
        self.apply(outcome);
        Ok(())
    }

    /// Get the training configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Get the final word vocabulary.
    pub fn vocab(&self) -> &WordVocab {
        &self.vocab
    }

    /// Get the learned merges.
    pub fn merges(&self) -> &MergeList {
        &self.merges
    }

    /// Get the end-of-word marker.
    pub fn eow_symbol(&self) -> &str {
        &self.config.eow_symbol
    }

    /// Why training stopped, or `None` for an untrained model.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Check whether the model has been trained.
    pub fn is_trained(&self) -> bool {
        self.stop_reason.is_some()
    }

    /// Symbol-type count of the final vocabulary.
    pub fn symbol_count(&self) -> usize {
        self.vocab.symbol_type_count()
    }

    /// Save the model to a directory in JSON format.
    pub fn save(&self, path: &Path) -> Result<()> {
        ModelSaver::new(self).save(path)
    }

    /// Save the model to a directory as `merges.txt` and `vocab.txt`.
    pub fn save_text(&self, path: &Path) -> Result<()> {
        ModelSaver::new(self).save_text(path)
    }

    /// Save the model in the given format.
    pub fn save_as(&self, path: &Path, format: ModelFormat) -> Result<()> {
        match format {
            ModelFormat::Json => self.save(path),
            ModelFormat::Text => self.save_text(path),
        }
    }

    /// Load a model from a directory in JSON format.
    pub fn load(path: &Path) -> Result<Self> {
        ModelLoader::load(path)
    }
}

//! Save functionality for trained models.
//!
//! This module provides methods for saving trained BPE models to disk
//! in JSON or plain text form.

use super::format::{
    SerializedEntry, SerializedMerge, SerializedModel, FORMAT_VERSION, MERGES_FILE,
    MERGES_HEADER, MODEL_FILE, VOCAB_FILE,
};
use crate::model::BpeModel;
use morphbpe_core::{Result, TokenizerError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Model saver - handles saving trained models.
pub struct ModelSaver<'a> {
    /// Model reference
    model: &'a BpeModel,
}

impl<'a> ModelSaver<'a> {
    /// Create a new model saver.
    pub fn new(model: &'a BpeModel) -> Self {
        Self { model }
    }

    /// Save the model to a directory in JSON format.
    ///
    /// This saves a single `bpe.json` file containing all model data.
    pub fn save(&self, path: &Path) -> Result<()> {
        create_dir(path)?;

        let file_path = path.join(MODEL_FILE);
        let mut writer = BufWriter::new(create_file(&file_path)?);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())
            .map_err(|e| TokenizerError::Save(format!("Failed to serialize model: {}", e)))?;
        writer.flush().map_err(write_error(MODEL_FILE))?;

        log::info!("Saved model to {}", file_path.display());
        Ok(())
    }

    /// Save in plain text format (merges.txt + vocab.txt).
    ///
    /// This creates two files:
    /// - `merges.txt`: a header line, then one `left right` merge per line in rank order
    /// - `vocab.txt`: one `key<TAB>frequency` entry per line, most frequent first
    pub fn save_text(&self, path: &Path) -> Result<()> {
        create_dir(path)?;

        let merges_path = path.join(MERGES_FILE);
        let mut merges_file = BufWriter::new(create_file(&merges_path)?);
        writeln!(merges_file, "{}", MERGES_HEADER).map_err(write_error(MERGES_FILE))?;
        for step in self.model.merges() {
            writeln!(merges_file, "{} {}", step.pair.0, step.pair.1)
                .map_err(write_error(MERGES_FILE))?;
        }
        merges_file.flush().map_err(write_error(MERGES_FILE))?;

        let vocab_path = path.join(VOCAB_FILE);
        let mut vocab_file = BufWriter::new(create_file(&vocab_path)?);
        for (key, frequency) in self.model.vocab().sorted_entries() {
            writeln!(vocab_file, "{}\t{}", key, frequency).map_err(write_error(VOCAB_FILE))?;
        }
        vocab_file.flush().map_err(write_error(VOCAB_FILE))?;

        log::info!(
            "Saved {} merges and {} vocabulary entries to {}",
            self.model.merges().len(),
            self.model.vocab().len(),
            path.display()
        );
        Ok(())
    }

    /// Serialize the model to a structure.
    pub(crate) fn serialize(&self) -> SerializedModel {
        let vocab = self
            .model
            .vocab()
            .sorted_entries()
            .into_iter()
            .map(|(key, frequency)| SerializedEntry {
                key: key.to_string(),
                frequency,
            })
            .collect();

        let merges = self
            .model
            .merges()
            .iter()
            .enumerate()
            .map(|(rank, step)| SerializedMerge {
                pair: (step.pair.0.to_string(), step.pair.1.to_string()),
                rank: rank as u32,
                count: step.count,
                symbol_count: step.symbol_count,
            })
            .collect();

        SerializedModel {
            version: FORMAT_VERSION.to_string(),
            config: self.model.config().clone(),
            stop_reason: self.model.stop_reason(),
            vocab,
            merges,
        }
    }
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| {
        TokenizerError::Save(format!(
            "Failed to create directory {}: {}",
            path.display(),
            e
        ))
    })
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| {
        TokenizerError::Save(format!("Failed to create file {}: {}", path.display(), e))
    })
}

fn write_error(file: &'static str) -> impl Fn(std::io::Error) -> TokenizerError {
    move |e| TokenizerError::Save(format!("Failed to write {}: {}", file, e))
}

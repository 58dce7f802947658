//! Load functionality for trained models.
//!
//! This module provides methods for loading BPE models from disk and
//! validating what was read.

use super::format::{SerializedModel, MERGES_FILE, MERGES_HEADER, MODEL_FILE, VOCAB_FILE};
use crate::model::BpeModel;
use morphbpe_core::{
    pair, split_key, validate_symbol, MergeList, MergeStep, Pair, Result, TokenizerError,
    WordVocab,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Model loader - handles loading trained models.
pub struct ModelLoader;

impl ModelLoader {
    /// Load a model from a directory in JSON format.
    ///
    /// Expects a `bpe.json` file in the given directory.
    pub fn load(path: &Path) -> Result<BpeModel> {
        let file_path = path.join(MODEL_FILE);
        let file = File::open(&file_path).map_err(|e| {
            TokenizerError::Load(format!(
                "Failed to open file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        let serialized: SerializedModel = serde_json::from_reader(reader)
            .map_err(|e| TokenizerError::Load(format!("Failed to deserialize model: {}", e)))?;

        let model = Self::deserialize(serialized)?;
        log::info!(
            "Loaded model from {}: {} merges, {} entries",
            file_path.display(),
            model.merges().len(),
            model.vocab().len()
        );
        Ok(model)
    }

    /// Load from plain text format (merges.txt + vocab.txt).
    ///
    /// Returns the vocabulary and the merge pairs in rank order.
    pub fn load_text(path: &Path) -> Result<(WordVocab, Vec<Pair>)> {
        let merges_path = path.join(MERGES_FILE);
        let merges_content = std::fs::read_to_string(&merges_path)
            .map_err(|e| TokenizerError::Load(format!("Failed to read {}: {}", MERGES_FILE, e)))?;

        let mut merges = Vec::new();
        for (line_num, line) in merges_content.lines().enumerate() {
            if line_num == 0 && line.starts_with(MERGES_HEADER) {
                continue;
            }
            let parts: Vec<&str> = line.split(' ').collect();
            if parts.len() != 2 {
                return Err(TokenizerError::Load(format!(
                    "Invalid merge format at line {}: '{}'",
                    line_num + 1,
                    line
                )));
            }
            validate_merge(parts[0], parts[1])?;
            merges.push(pair(parts[0], parts[1]));
        }

        let vocab_path = path.join(VOCAB_FILE);
        let vocab_content = std::fs::read_to_string(&vocab_path)
            .map_err(|e| TokenizerError::Load(format!("Failed to read {}: {}", VOCAB_FILE, e)))?;

        let mut vocab = WordVocab::new();
        for (line_num, line) in vocab_content.lines().enumerate() {
            let (key, frequency) = line.rsplit_once('\t').ok_or_else(|| {
                TokenizerError::Load(format!(
                    "Invalid vocabulary format at line {}: '{}'",
                    line_num + 1,
                    line
                ))
            })?;
            let frequency: u64 = frequency.parse().map_err(|e| {
                TokenizerError::Load(format!(
                    "Invalid frequency at line {}: '{}': {}",
                    line_num + 1,
                    frequency,
                    e
                ))
            })?;
            validate_entry(key, frequency)?;
            vocab.add(key, frequency);
        }

        Ok((vocab, merges))
    }

    /// Deserialize from a serialized structure.
    pub(crate) fn deserialize(data: SerializedModel) -> Result<BpeModel> {
        data.config
            .validate()
            .map_err(|e| TokenizerError::Load(format!("Invalid stored configuration: {}", e)))?;

        let mut vocab = WordVocab::with_capacity(data.vocab.len());
        for entry in data.vocab {
            validate_entry(&entry.key, entry.frequency)?;
            vocab.add(entry.key, entry.frequency);
        }

        let mut serialized_merges = data.merges;
        serialized_merges.sort_by_key(|m| m.rank);

        let mut merges = MergeList::with_capacity(serialized_merges.len());
        for (expected, merge) in serialized_merges.into_iter().enumerate() {
            if merge.rank as usize != expected {
                return Err(TokenizerError::Load(format!(
                    "Merge ranks are not contiguous: expected {}, found {}",
                    expected, merge.rank
                )));
            }
            validate_merge(&merge.pair.0, &merge.pair.1)?;
            merges.push(MergeStep {
                pair: pair(&merge.pair.0, &merge.pair.1),
                count: merge.count,
                symbol_count: merge.symbol_count,
            });
        }

        Ok(BpeModel::from_parts(
            data.config,
            vocab,
            merges,
            data.stop_reason,
        ))
    }
}

fn validate_merge(left: &str, right: &str) -> Result<()> {
    validate_symbol(left)?;
    validate_symbol(right)
}

fn validate_entry(key: &str, frequency: u64) -> Result<()> {
    if frequency == 0 {
        return Err(TokenizerError::Load(format!(
            "Vocabulary entry '{}' has zero frequency",
            key
        )));
    }
    for symbol in split_key(key) {
        validate_symbol(symbol)
            .map_err(|e| TokenizerError::Load(format!("Invalid vocabulary key '{}': {}", key, e)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::format::{SerializedEntry, SerializedMerge, FORMAT_VERSION};
    use morphbpe_training::TrainingConfig;

    fn serialized(merges: Vec<SerializedMerge>) -> SerializedModel {
        SerializedModel {
            version: FORMAT_VERSION.to_string(),
            config: TrainingConfig::default(),
            stop_reason: None,
            vocab: vec![SerializedEntry {
                key: "ab _EOW".to_string(),
                frequency: 2,
            }],
            merges,
        }
    }

    fn merge(left: &str, right: &str, rank: u32) -> SerializedMerge {
        SerializedMerge {
            pair: (left.to_string(), right.to_string()),
            rank,
            count: 2,
            symbol_count: 2,
        }
    }

    #[test]
    fn test_load_roundtrip() {
        let temp_dir = std::env::temp_dir().join("morphbpe_test_load");

        let mut model = BpeModel::builder()
            .max_merges(Some(4))
            .parallel(false)
            .build()
            .unwrap();
        model.train_lines(["low lower newest widest", "low low"]).unwrap();
        model.save(&temp_dir).unwrap();

        let loaded = ModelLoader::load(&temp_dir).unwrap();

        assert_eq!(loaded.vocab(), model.vocab());
        assert_eq!(loaded.config(), model.config());
        assert_eq!(loaded.stop_reason(), model.stop_reason());
        let a: Vec<_> = loaded.merges().iter().collect();
        let b: Vec<_> = model.merges().iter().collect();
        assert_eq!(a, b);

        std::fs::remove_dir_all(temp_dir).ok();
    }

    #[test]
    fn test_load_text_roundtrip() {
        let temp_dir = std::env::temp_dir().join("morphbpe_test_load_text");

        let mut model = BpeModel::builder()
            .max_merges(Some(3))
            .parallel(false)
            .build()
            .unwrap();
        model.train_lines(["low lower newest widest"]).unwrap();
        model.save_text(&temp_dir).unwrap();

        let (vocab, merges) = ModelLoader::load_text(&temp_dir).unwrap();
        assert_eq!(&vocab, model.vocab());
        let expected: Vec<Pair> = model.merges().pairs().cloned().collect();
        assert_eq!(merges, expected);

        std::fs::remove_dir_all(temp_dir).ok();
    }

    #[test]
    fn test_rank_order_restored() {
        let model = ModelLoader::deserialize(serialized(vec![
            merge("ab", "_EOW", 1),
            merge("a", "b", 0),
        ]))
        .unwrap();

        assert_eq!(model.merges().rank("a", "b"), Some(0));
        assert_eq!(model.merges().rank("ab", "_EOW"), Some(1));
    }

    #[test]
    fn test_rank_gap_rejected() {
        let result = ModelLoader::deserialize(serialized(vec![merge("a", "b", 0), merge("ab", "c", 2)]));
        assert!(matches!(result, Err(TokenizerError::Load(_))));
    }

    #[test]
    fn test_invalid_symbol_rejected() {
        let result = ModelLoader::deserialize(serialized(vec![merge("a b", "c", 0)]));
        assert!(result.is_err());

        let mut data = serialized(Vec::new());
        data.vocab[0].frequency = 0;
        assert!(ModelLoader::deserialize(data).is_err());
    }

    #[test]
    fn test_load_missing_directory() {
        let result = ModelLoader::load(Path::new("/nonexistent/morphbpe/model"));
        assert!(matches!(result, Err(TokenizerError::Load(_))));
    }
}

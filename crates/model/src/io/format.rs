//! Format definitions for model serialization.
//!
//! This module defines the data structures used for saving/loading
//! trained BPE models.

use morphbpe_training::{StopReason, TrainingConfig};
use serde::{Deserialize, Serialize};

/// Current on-disk format version.
pub const FORMAT_VERSION: &str = "1.0";

/// JSON model file name.
pub const MODEL_FILE: &str = "bpe.json";

/// Text merge list file name.
pub const MERGES_FILE: &str = "merges.txt";

/// Text vocabulary file name.
pub const VOCAB_FILE: &str = "vocab.txt";

/// Header line written at the top of `merges.txt`.
pub const MERGES_HEADER: &str = "#version: morphbpe";

/// Model format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Single JSON file with configuration, vocabulary and merges
    Json,
    /// Plain text `merges.txt` + `vocab.txt`
    Text,
}

/// One vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedEntry {
    /// Space-joined symbol sequence
    pub key: String,
    /// Number of word occurrences
    pub frequency: u64,
}

/// Merge rule for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedMerge {
    /// The pair of symbols being merged
    pub pair: (String, String),
    /// The rank/priority of this merge
    pub rank: u32,
    /// Pair frequency when the merge was selected
    pub count: u64,
    /// Symbol-type count after the merge
    pub symbol_count: usize,
}

/// Complete model serialization format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Format version
    pub version: String,
    /// Configuration the model was trained with
    pub config: TrainingConfig,
    /// Why training stopped, if the model was trained
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    /// Vocabulary entries, most frequent first
    pub vocab: Vec<SerializedEntry>,
    /// Merge rules in rank order
    pub merges: Vec<SerializedMerge>,
}

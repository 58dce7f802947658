//! Morphbpe-core - Core data structures for BPE vocabulary learning
//!
//! This crate provides the fundamental types shared by the training loop and
//! the persistence layer: word decomposition keys, the frequency vocabulary,
//! scored merge candidates and the ordered list of learned merges.
//!
//! # Features
//!
//! - Canonical space-joined decomposition keys built on `CompactString`
//! - `AHashMap`-backed word vocabulary with frequency conservation helpers
//! - Deterministic, explicit tie-breaking among equally scored candidates
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use morphbpe_core::{word_key, WordVocab, DEFAULT_EOW};
//!
//! let mut vocab = WordVocab::new();
//! vocab.add(word_key("low", DEFAULT_EOW), 1);
//! assert_eq!(vocab.get("l o w _EOW"), Some(1));
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use crate::core::{
    best_scored, compare_scored, join_symbols, merged_symbol, pair, split_key, validate_eow,
    validate_symbol, word_key, MergeCandidate, MergeList, MergeStats, MergeStep, Pair, Symbol,
    TieBreak, WordCounts, WordVocab, DEFAULT_EOW, SYMBOL_SEPARATOR,
};

//! Core BPE vocabulary-learning data structures.
//!
//! This module contains the symbol and key helpers, the word vocabulary,
//! merge candidates with their tie-break policy, and the learned merge list.

pub mod candidate;
pub mod merges;
pub mod symbols;
pub mod vocab;

pub use candidate::{best_scored, compare_scored, MergeCandidate, TieBreak};
pub use merges::{merged_symbol, pair, MergeList, MergeStats, MergeStep, Pair};
pub use symbols::{
    join_symbols, split_key, validate_eow, validate_symbol, word_key, Symbol, DEFAULT_EOW,
    SYMBOL_SEPARATOR,
};
pub use vocab::{WordCounts, WordVocab};

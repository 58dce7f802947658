//! Training infrastructure for BPE vocabularies.
//!
//! This module provides the vocabulary builder and the training loop that
//! learns an ordered merge list from text data.

pub mod builder;
pub mod counter;
pub mod trainer;

pub use builder::{pair_scores, VocabularyBuilder};
pub use counter::{PairCounter, PairCounts};
pub use trainer::{BpeTrainer, StopReason, TrainingConfig, TrainingOutcome};

//! Morphbpe-training - BPE vocabulary learning
//!
//! This crate provides the vocabulary builder and the greedy merge loop that
//! learn a BPE subword vocabulary from whitespace-tokenised text.
//!
//! # Features
//!
//! - Frequency-weighted scoring of adjacent symbol pairs, optionally in parallel
//! - Exhaustive merges matched on whole symbols only
//! - Configurable stopping criteria (merge count, vocabulary size, frequency)
//! - Integration with morphbpe-core for vocabularies and merge lists
//!
//! # Example
//!
//! ```rust
//! use morphbpe_training::{BpeTrainer, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig {
//!     max_merges: Some(10),
//!     ..Default::default()
//! })?;
//!
//! let outcome = trainer.train_lines(["low lower newest widest"])?;
//! assert_eq!(outcome.vocab.total_frequency(), 4);
//! # Ok::<(), morphbpe_training::TokenizerError>(())
//! ```

pub use morphbpe_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    pair_scores, BpeTrainer, PairCounter, PairCounts, StopReason, TrainingConfig,
    TrainingOutcome, VocabularyBuilder,
};

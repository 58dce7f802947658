//! Morphbpe - BPE subword vocabulary learning
//!
//! This crate provides a user-friendly interface for learning a BPE subword
//! vocabulary, integrating the core types and the training loop into a single
//! model type that can be trained, saved and loaded.
//!
//! # Features
//!
//! - Simple builder pattern for training configuration
//! - Training from strings, readers or files
//! - Saving and loading as JSON or as plain text merge/vocabulary lists
//!
//! # Example
//!
//! ```rust
//! use morphbpe::BpeModel;
//!
//! let mut model = BpeModel::builder()
//!     .max_merges(Some(10))
//!     .build()?;
//!
//! model.train("low lower newest widest\nlow low")?;
//! for step in model.merges() {
//!     println!("{} {} ({})", step.pair.0, step.pair.1, step.count);
//! }
//! # Ok::<(), morphbpe::TokenizerError>(())
//! ```

// Re-export core and training types
pub use morphbpe_core::{
    MergeCandidate, MergeList, MergeStats, MergeStep, Pair, Result, TieBreak, TokenizerError,
    WordVocab, DEFAULT_EOW,
};
pub use morphbpe_training::{
    BpeTrainer, StopReason, TrainingConfig, TrainingOutcome, VocabularyBuilder,
};

// Model API
pub mod model;
pub use model::{BpeModel, BpeModelBuilder};

// IO/Serialization
pub mod io;
pub use io::{ModelFormat, ModelLoader, ModelSaver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Serialization and deserialization for BPE models.
//!
//! This module provides functionality for saving and loading trained models
//! as a single JSON file or as plain text merge and vocabulary lists.

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFormat, SerializedModel, MERGES_FILE, MODEL_FILE, VOCAB_FILE};
pub use load::ModelLoader;
pub use save::ModelSaver;

//! Reading pre-trained models from disk.
//!
//! This module provides loading of tokenizers in the HuggingFace GPT-2
//! layout (`vocab.json` + `merges.txt`).

pub mod format;
pub mod load;

pub use format::{HuggingFaceConfig, HuggingFaceVocab, TokenEntry};
pub use load::TokenizerLoader;

//! Load functionality for pre-trained tokenizers.
//!
//! This module reads vocabulary and merge files from disk and hands the
//! parsed structures to [`Tokenizer::new`].

use super::format::{HuggingFaceConfig, HuggingFaceVocab, CONFIG_FILE, MERGES_FILE, VOCAB_FILE};
use crate::tokenizer::{Tokenizer, TokenizerConfig};
use bytebpe_core::{Result, TokenizerError};
use std::path::Path;

/// Tokenizer loader - handles loading pre-trained models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load from a HuggingFace-style directory.
    ///
    /// Expects `vocab.json` and `merges.txt`; `tokenizer_config.json` is
    /// optional and supplies the unknown and special tokens.
    pub fn from_dir(path: &Path) -> Result<Tokenizer> {
        let config = Self::config_from_dir(path)?;
        Self::from_files(&path.join(VOCAB_FILE), &path.join(MERGES_FILE), config)
    }

    /// Load from explicit vocabulary and merges files.
    pub fn from_files(
        vocab_path: &Path,
        merges_path: &Path,
        config: TokenizerConfig,
    ) -> Result<Tokenizer> {
        let vocab = Self::read_vocab(vocab_path)?;
        let merges = read_to_string(merges_path)?;

        Tokenizer::new(vocab, &merges, config)
    }

    /// Build a configuration from `tokenizer_config.json` in `path`.
    ///
    /// Falls back to the default configuration if the file does not exist.
    pub fn config_from_dir(path: &Path) -> Result<TokenizerConfig> {
        let mut config = TokenizerConfig::default();

        let config_path = path.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Ok(config);
        }

        let content = read_to_string(&config_path)?;
        let hf: HuggingFaceConfig = serde_json::from_str(&content).map_err(|e| {
            TokenizerError::Load(format!(
                "Failed to deserialize {}: {}",
                config_path.display(),
                e
            ))
        })?;

        if let Some(unk) = &hf.unk_token {
            config.unk_token = unk.content().to_string();
        }
        config
            .special_tokens
            .extend(hf.special_tokens().map(str::to_string));

        Ok(config)
    }

    /// Read a flat `token -> id` JSON object.
    pub fn read_vocab(path: &Path) -> Result<HuggingFaceVocab> {
        let content = read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            TokenizerError::Load(format!(
                "Failed to deserialize vocab {}: {}",
                path.display(),
                e
            ))
        })
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| TokenizerError::Io {
        path: path.to_path_buf(),
        err,
    })
}

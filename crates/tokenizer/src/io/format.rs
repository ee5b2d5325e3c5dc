//! On-disk formats read by the loader.
//!
//! Models come in the HuggingFace GPT-2 layout: `vocab.json`, `merges.txt`
//! and an optional `tokenizer_config.json`.

use serde::Deserialize;
use std::collections::HashMap;

/// Vocabulary file name.
pub const VOCAB_FILE: &str = "vocab.json";
/// Merge rules file name.
pub const MERGES_FILE: &str = "merges.txt";
/// Tokenizer configuration file name.
pub const CONFIG_FILE: &str = "tokenizer_config.json";

/// Vocabulary in HuggingFace format: a flat token -> id object.
pub type HuggingFaceVocab = HashMap<String, u32>;

/// A token entry, either a bare string or an added-token object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TokenEntry {
    Plain(String),
    Added { content: String },
}

impl TokenEntry {
    pub fn content(&self) -> &str {
        match self {
            TokenEntry::Plain(s) => s,
            TokenEntry::Added { content } => content,
        }
    }
}

/// The subset of `tokenizer_config.json` the loader understands.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HuggingFaceConfig {
    #[serde(default)]
    pub unk_token: Option<TokenEntry>,
    #[serde(default)]
    pub bos_token: Option<TokenEntry>,
    #[serde(default)]
    pub eos_token: Option<TokenEntry>,
    #[serde(default)]
    pub additional_special_tokens: Vec<TokenEntry>,
}

impl HuggingFaceConfig {
    /// Special token literals: bos, eos, then the additional tokens.
    pub fn special_tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.bos_token
            .iter()
            .chain(self.eos_token.iter())
            .chain(self.additional_special_tokens.iter())
            .map(TokenEntry::content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gpt2_config() {
        let config: HuggingFaceConfig = serde_json::from_str(
            r#"{
                "add_prefix_space": false,
                "bos_token": "<|endoftext|>",
                "eos_token": {"content": "<|endoftext|>", "lstrip": false, "__type": "AddedToken"},
                "unk_token": "<|endoftext|>",
                "model_max_length": 1024
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.unk_token.as_ref().map(TokenEntry::content),
            Some("<|endoftext|>")
        );
        let special: Vec<&str> = config.special_tokens().collect();
        assert_eq!(special, vec!["<|endoftext|>", "<|endoftext|>"]);
    }

    #[test]
    fn test_null_and_missing_fields() {
        let config: HuggingFaceConfig =
            serde_json::from_str(r#"{"bos_token": null, "additional_special_tokens": ["<a>", "<b>"]}"#)
                .unwrap();

        assert!(config.unk_token.is_none());
        let special: Vec<&str> = config.special_tokens().collect();
        assert_eq!(special, vec!["<a>", "<b>"]);
    }
}

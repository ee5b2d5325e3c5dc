//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that wires the
//! special-token splitter, the pre-tokenizer and the byte-level encoder into
//! one pipeline.

use crate::pre_tokenizer::{split_special_tokens, SplitPattern, Splitter};
use bytebpe_core::{
    ByteLevelEncoder, ByteSymbolTable, MergeRules, Result, SpecialTokens, TokenizerError,
    Vocabulary,
};
use serde::{Deserialize, Serialize};

/// Default unknown token, as used by GPT-2.
pub const DEFAULT_UNK_TOKEN: &str = "<|endoftext|>";

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Unknown token; added to the vocabulary if missing
    pub unk_token: String,
    /// Special token literals, in registration order
    pub special_tokens: Vec<String>,
    /// Pre-tokenization pattern
    pub pattern: SplitPattern,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            unk_token: DEFAULT_UNK_TOKEN.to_string(),
            special_tokens: Vec::new(),
            pattern: SplitPattern::Gpt2,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: TokenizerConfig) -> Self {
        Self { config }
    }

    /// Set the unknown token.
    pub fn unk_token(mut self, token: impl Into<String>) -> Self {
        self.config.unk_token = token.into();
        self
    }

    /// Register special tokens from a whitespace-separated list.
    pub fn special_tokens(mut self, tokens: &str) -> Self {
        self.config
            .special_tokens
            .extend(tokens.split_whitespace().map(str::to_string));
        self
    }

    /// Register a single special token literal as-is.
    pub fn special_token(mut self, token: impl Into<String>) -> Self {
        self.config.special_tokens.push(token.into());
        self
    }

    /// Set the pre-tokenization pattern.
    pub fn pattern(mut self, pattern: SplitPattern) -> Self {
        self.config.pattern = pattern;
        self
    }

    /// Build the tokenizer from a token -> id mapping and `merges.txt` content.
    pub fn build<I, S>(self, vocab: I, merges: &str) -> Result<Tokenizer>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        Tokenizer::new(vocab, merges, self.config)
    }
}

/// Main tokenizer struct.
///
/// Everything is built once in [`Tokenizer::new`] and only read afterwards,
/// so a tokenizer can be shared between threads without locking.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Vocabulary
    vocab: Vocabulary,
    /// Byte-symbol table and merge rules
    encoder: ByteLevelEncoder,
    /// Special tokens in registration order
    special: SpecialTokens,
    /// Word splitter
    splitter: Splitter,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a new tokenizer.
    ///
    /// # Arguments
    /// * `vocab` - Token -> id entries, ids dense over `[0, N)`
    /// * `merges` - `merges.txt` content, one `"left right"` rule per line
    /// * `config` - Unknown token, special tokens and split pattern
    pub fn new<I, S>(vocab: I, merges: &str, config: TokenizerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let splitter = Splitter::new(&config.pattern)?;

        let mut vocab = Vocabulary::from_entries(vocab, &config.unk_token)?;
        let table = ByteSymbolTable::from_vocab(&vocab)?;
        let merges = MergeRules::parse(merges, &mut vocab)?;

        let mut special = SpecialTokens::new();
        for literal in &config.special_tokens {
            if literal.is_empty() {
                return Err(TokenizerError::EmptySpecialToken);
            }
            let id = vocab.add_token(literal);
            special.add(literal, id)?;
        }

        log::debug!(
            "tokenizer ready: {} tokens, {} merges, {} special tokens",
            vocab.len(),
            merges.len(),
            special.len()
        );

        Ok(Self {
            vocab,
            encoder: ByteLevelEncoder::new(table, merges),
            special,
            splitter,
            config,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Encode text to at most `max_tokens` token ids.
    ///
    /// Special tokens become their registered id; every other span is split
    /// into words, byte-encoded and merged. Output stops as soon as the cap is
    /// reached, even in the middle of a word.
    pub fn encode(&self, text: &str, max_tokens: usize) -> Vec<u32> {
        let mut ids = Vec::new();

        for segment in split_special_tokens(&self.special, text) {
            if ids.len() >= max_tokens {
                break;
            }

            if let Some(id) = segment.special {
                ids.push(id);
                continue;
            }

            for fragment in self.splitter.split(segment.text) {
                let remaining = max_tokens - ids.len();
                if remaining == 0 {
                    break;
                }
                ids.extend(self.encoder.encode(fragment).into_iter().take(remaining));
            }
        }

        ids
    }

    /// Tokenize text to at most `max_tokens` token strings.
    pub fn tokenize(&self, text: &str, max_tokens: usize) -> Vec<String> {
        self.encode(text, max_tokens)
            .into_iter()
            .filter_map(|id| self.vocab.get_token(id))
            .map(str::to_string)
            .collect()
    }

    /// Decode token IDs back to text.
    ///
    /// Special tokens decode to their literal; other tokens are mapped back
    /// through the byte symbols.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let mut bytes = Vec::with_capacity(ids.len() * 4);

        for &id in ids {
            let token = self
                .vocab
                .get_token(id)
                .ok_or(TokenizerError::UnknownTokenId(id))?;

            if self.special.is_special(id) {
                bytes.extend_from_slice(token.as_bytes());
            } else {
                ByteLevelEncoder::decode_token(token, &mut bytes);
            }
        }

        String::from_utf8(bytes).map_err(|e| {
            TokenizerError::Tokenization(format!(
                "Invalid UTF-8 sequence during decoding: {}",
                e
            ))
        })
    }

    /// Get the ID for a token string.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.vocab.get_id(token)
    }

    /// Get the token string for an ID.
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.vocab.get_token(id)
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// ID of the unknown token.
    pub fn unk_id(&self) -> u32 {
        self.vocab.unk_id()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Special tokens in registration order.
    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    pub fn merges(&self) -> &MergeRules {
        self.encoder.merges()
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }
}

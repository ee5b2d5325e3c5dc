//! Vocabulary storage and lookup.
//!
//! This module provides efficient vocabulary storage using AHashMap for fast lookups
//! and CompactString for memory-efficient string storage. Ids are dense over
//! `[0, len)`, so the reverse mapping is a plain vector indexed by id.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = Vec<CompactString>;

/// Vocabulary with forward and reverse mappings and a guaranteed unknown token.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    vocab: Vocab,
    /// Reverse mapping: ID -> token string
    vocab_r: VocabR,
    /// ID of the unknown token
    unk: u32,
}

impl Vocabulary {
    /// Build a vocabulary from `(token, id)` entries.
    ///
    /// Ids must cover `[0, N)` exactly once. If `unk_token` is not among the
    /// entries it is appended with the next free id and a warning is logged.
    pub fn from_entries<I, S>(entries: I, unk_token: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let entries: Vec<(S, u32)> = entries.into_iter().collect();
        let len = entries.len();

        let mut vocab = Vocab::with_capacity(len + 1);
        let mut slots: Vec<Option<CompactString>> = vec![None; len];

        for (token, id) in entries {
            let token = CompactString::new(token.as_ref());
            let slot = slots.get_mut(id as usize).ok_or_else(|| {
                TokenizerError::InvalidVocabulary(format!(
                    "token {:?} has id {} outside [0, {})",
                    token, id, len
                ))
            })?;
            if let Some(existing) = slot {
                return Err(TokenizerError::InvalidVocabulary(format!(
                    "id {} is shared by {:?} and {:?}",
                    id, existing, token
                )));
            }
            if vocab.insert(token.clone(), id).is_some() {
                return Err(TokenizerError::InvalidVocabulary(format!(
                    "token {:?} appears more than once",
                    token
                )));
            }
            *slot = Some(token);
        }

        // `len` distinct ids below `len` fill every slot.
        let vocab_r: VocabR = slots.into_iter().flatten().collect();

        let mut vocabulary = Self {
            vocab,
            vocab_r,
            unk: 0,
        };

        vocabulary.unk = match vocabulary.get_id(unk_token) {
            Some(id) => id,
            None => {
                let id = vocabulary.add_token(unk_token);
                log::warn!(
                    "unknown token {:?} is not in the vocabulary, added with id {}",
                    unk_token,
                    id
                );
                id
            }
        };

        Ok(vocabulary)
    }

    /// Add a token to the vocabulary.
    ///
    /// Returns the existing ID if the token is already present, otherwise the
    /// next free ID.
    pub fn add_token(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.vocab.get(token) {
            return id;
        }

        let token = CompactString::new(token);
        let id = self.vocab_r.len() as u32;
        self.vocab_r.push(token.clone());
        self.vocab.insert(token, id);

        id
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(id as usize).map(|s| s.as_str())
    }

    /// ID of the unknown token.
    #[inline]
    pub fn unk_id(&self) -> u32 {
        self.unk
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab_r.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab_r.is_empty()
    }

    /// Iterate over `(token, id)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.vocab_r
            .iter()
            .enumerate()
            .map(|(id, token)| (token.as_str(), id as u32))
    }
}

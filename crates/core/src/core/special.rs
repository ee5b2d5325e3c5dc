//! Registered special tokens.
//!
//! Special tokens are literals that always tokenize as a single unit. The list
//! keeps registration order, which decides who wins when two literals overlap.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// A special token literal and its vocabulary id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialToken {
    /// Literal text matched in the input
    pub content: CompactString,
    /// Vocabulary id emitted for the literal
    pub id: u32,
}

/// Ordered list of special tokens.
#[derive(Debug, Clone, Default)]
pub struct SpecialTokens {
    tokens: Vec<SpecialToken>,
    index: AHashMap<CompactString, u32>,
}

impl SpecialTokens {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a special token.
    ///
    /// Registering the same literal with the same id again is a no-op. An empty
    /// literal or a literal already bound to a different id is an error.
    pub fn add(&mut self, content: &str, id: u32) -> Result<()> {
        if content.is_empty() {
            return Err(TokenizerError::EmptySpecialToken);
        }

        if let Some(&existing) = self.index.get(content) {
            if existing != id {
                return Err(TokenizerError::DuplicateSpecialToken {
                    token: content.to_string(),
                    existing,
                    requested: id,
                });
            }
            return Ok(());
        }

        let content = CompactString::new(content);
        self.index.insert(content.clone(), id);
        self.tokens.push(SpecialToken { content, id });

        Ok(())
    }

    /// Check if an ID belongs to a special token.
    #[inline]
    pub fn is_special(&self, id: u32) -> bool {
        self.tokens.iter().any(|t| t.id == id)
    }

    /// Look up the id registered for a literal.
    #[inline]
    pub fn get_id(&self, content: &str) -> Option<u32> {
        self.index.get(content).copied()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, SpecialToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a> IntoIterator for &'a SpecialTokens {
    type Item = &'a SpecialToken;
    type IntoIter = std::slice::Iter<'a, SpecialToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

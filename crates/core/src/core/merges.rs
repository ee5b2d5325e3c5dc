//! Merge rule management for BPE.
//!
//! This module provides data structures for storing and applying BPE merge rules.
//! Merge rules are stored using token IDs rather than strings for fast comparison.

use crate::core::vocab::Vocabulary;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;

/// A pair of token IDs that can be merged.
pub type Pair = (u32, u32);

/// Merge rule mapping: pair -> (rank, new_token_id).
///
/// The rank indicates the priority of this merge rule (lower rank = higher priority).
/// The new_token_id is the ID of the token created by merging this pair.
pub type MergeMap = AHashMap<Pair, (u32, u32)>;

/// Collection of BPE merge rules with efficient lookup.
#[derive(Debug, Clone)]
pub struct MergeRules {
    /// Merge rules: pair -> (rank, new_token_id)
    pub merges: MergeMap,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self {
            merges: MergeMap::new(),
        }
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: MergeMap::with_capacity(capacity),
        }
    }

    /// Parse merge rules from `merges.txt` content.
    ///
    /// Each rule is `"left right"` separated by a single space. Blank lines are
    /// skipped, trailing `\r` is stripped, and lines starting with `#` are skipped
    /// until the first rule has been accepted. Ranks follow the order of accepted
    /// rules. Tokens referenced by a rule but absent from `vocab` are appended to it.
    pub fn parse(content: &str, vocab: &mut Vocabulary) -> Result<Self> {
        let mut rules = Self::with_capacity(content.len() / 8);
        let mut rank = 0u32;

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            if rank == 0 && line.starts_with('#') {
                continue;
            }

            let (left, right) = match line.split_once(' ') {
                Some((l, r)) if !l.is_empty() && !r.is_empty() && !r.contains(' ') => (l, r),
                _ => {
                    return Err(TokenizerError::InvalidMerge {
                        line: line_num + 1,
                        content: line.to_string(),
                    })
                }
            };

            let merged = format!("{}{}", left, right);
            let left_id = Self::resolve(vocab, left);
            let right_id = Self::resolve(vocab, right);
            let merged_id = Self::resolve(vocab, &merged);

            rules.add_merge((left_id, right_id), rank, merged_id);
            rank += 1;
        }

        Ok(rules)
    }

    fn resolve(vocab: &mut Vocabulary, token: &str) -> u32 {
        match vocab.get_id(token) {
            Some(id) => id,
            None => {
                let id = vocab.add_token(token);
                log::debug!("merge rule token {:?} not in vocabulary, added with id {}", token, id);
                id
            }
        }
    }

    /// Add a merge rule.
    ///
    /// # Arguments
    /// * `pair` - The pair of token IDs to merge
    /// * `rank` - The priority rank (lower = higher priority)
    /// * `new_token_id` - The ID of the token created by this merge
    pub fn add_merge(&mut self, pair: Pair, rank: u32, new_token_id: u32) {
        self.merges.insert(pair, (rank, new_token_id));
    }

    /// Get the merge rule for a pair.
    ///
    /// Returns Some((rank, new_token_id)) if this pair should be merged,
    /// None otherwise.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<(u32, u32)> {
        self.merges.get(&pair).copied()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Apply the merge rules to a sequence of token ids in place.
    ///
    /// Each round picks the adjacent pair with the lowest rank (leftmost on
    /// ties) and replaces every non-overlapping occurrence of that exact pair,
    /// scanning left to right from the first one. Ids produced in a round only
    /// take part in later rounds. Stops when no adjacent pair has a rule.
    pub fn apply(&self, tokens: &mut Vec<u32>) {
        while tokens.len() >= 2 {
            let mut best: Option<(usize, u32, u32)> = None;

            for (pos, window) in tokens.windows(2).enumerate() {
                if let Some((rank, new_id)) = self.get((window[0], window[1])) {
                    if best.map_or(true, |(_, best_rank, _)| rank < best_rank) {
                        best = Some((pos, rank, new_id));
                    }
                }
            }

            let Some((start, _, new_id)) = best else {
                break;
            };
            let (left, right) = (tokens[start], tokens[start + 1]);

            let mut read = start;
            let mut write = start;
            while read < tokens.len() {
                if read + 1 < tokens.len() && tokens[read] == left && tokens[read + 1] == right {
                    tokens[write] = new_id;
                    read += 2;
                } else {
                    tokens[write] = tokens[read];
                    read += 1;
                }
                write += 1;
            }
            tokens.truncate(write);
        }
    }
}

impl Default for MergeRules {
    fn default() -> Self {
        Self::new()
    }
}

//! Core BPE data structures.
//!
//! This module contains the vocabulary, the merge rules with the merge
//! engine, and the ordered special-token list. All of them are built once and
//! only read afterwards.

pub mod merges;
pub mod special;
pub mod vocab;

pub use merges::{MergeMap, MergeRules, Pair};
pub use special::{SpecialToken, SpecialTokens};
pub use vocab::{Vocab, VocabR, Vocabulary};

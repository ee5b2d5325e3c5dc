//! bytebpe-core - Core byte-level BPE implementation
//!
//! This crate provides the fundamental data structures and algorithms for
//! GPT-2 style byte-level byte-pair encoding (BPE).
//!
//! # Features
//!
//! - Dense vocabulary storage using `AHashMap` and compact strings
//! - Rank-ordered merge rules and the greedy merge engine
//! - Byte-symbol table mapping every byte to a vocabulary id
//! - Ordered special-token registration
//!
//! # Example
//!
//! ```rust
//! use bytebpe_core::{byte_symbol, ByteLevelEncoder, ByteSymbolTable, MergeRules, Vocabulary};
//!
//! let entries = (0..=255u8).map(|b| (byte_symbol(b).to_string(), b as u32));
//! let mut vocab = Vocabulary::from_entries(entries, "<|endoftext|>")?;
//! let table = ByteSymbolTable::from_vocab(&vocab)?;
//! let merges = MergeRules::parse("h i\n", &mut vocab)?;
//!
//! let encoder = ByteLevelEncoder::new(table, merges);
//! let ids = encoder.encode("hi");
//! assert_eq!(vocab.get_token(ids[0]), Some("hi"));
//! # Ok::<(), bytebpe_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data structures
pub mod core;
pub use self::core::{
    MergeMap, MergeRules, Pair, SpecialToken, SpecialTokens, Vocab, VocabR, Vocabulary,
};

// Byte-level encoding
pub mod encoding;
pub use encoding::{byte_symbol, symbol_byte, ByteLevelEncoder, ByteSymbolTable};

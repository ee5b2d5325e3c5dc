//! bytebpe-tokenizer - GPT-2 style byte-level BPE tokenizer
//!
//! This crate wires the core data structures into the full tokenization
//! pipeline: special-token segmentation, regex pre-tokenization, byte-symbol
//! encoding and rank-ordered merging.
//!
//! # Features
//!
//! - Builder pattern for tokenizer configuration
//! - Special tokens that always come out as a single token
//! - Hard cap on the number of emitted tokens
//! - Loading of HuggingFace GPT-2 model directories
//!
//! # Example
//!
//! ```rust
//! use bytebpe_tokenizer::{byte_symbol, Tokenizer};
//!
//! let vocab = (0..=255u8).map(|b| (byte_symbol(b).to_string(), b as u32));
//! let tokenizer = Tokenizer::builder()
//!     .special_tokens("<|endoftext|>")
//!     .build(vocab, "h i\n")?;
//!
//! let tokens = tokenizer.tokenize("hi<|endoftext|>", 16);
//! assert_eq!(tokens, vec!["hi", "<|endoftext|>"]);
//!
//! let ids = tokenizer.encode("hi there", 16);
//! assert_eq!(tokenizer.decode(&ids)?, "hi there");
//! # Ok::<(), bytebpe_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytebpe_core::{byte_symbol, Result, SpecialToken, SpecialTokens, TokenizerError, Vocabulary};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig, DEFAULT_UNK_TOKEN};

// IO
pub mod io;
pub use io::TokenizerLoader;

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{split_special_tokens, Segment, SplitPattern, Splitter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

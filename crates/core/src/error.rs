//! Error types for the BPE tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Error during tokenization or decoding
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// Error loading vocabulary or merges
    #[error("Load error: {0}")]
    Load(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Vocabulary ids are not a dense bijection over `[0, N)`
    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// A byte-level base symbol is missing from the vocabulary
    #[error("Byte symbol {symbol:?} for byte 0x{byte:02x} is missing from the vocabulary")]
    MissingByteSymbol { byte: u8, symbol: char },

    /// Invalid merge rule
    #[error("Cannot parse merge line {line}: {content:?}")]
    InvalidMerge { line: usize, content: String },

    /// Special token with an empty literal
    #[error("Empty special token")]
    EmptySpecialToken,

    /// Special token registered twice with different ids
    #[error("Duplicate special token {token:?}: already registered with id {existing}, got {requested}")]
    DuplicateSpecialToken {
        token: String,
        existing: u32,
        requested: u32,
    },

    /// Pre-tokenizer pattern failed to compile
    #[error("Invalid pre-tokenizer pattern: {0}")]
    Pattern(String),

    /// Unknown token ID
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

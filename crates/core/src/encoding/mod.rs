//! Byte-level encoding for BPE tokenization.
//!
//! Text is handled as UTF-8 bytes, each byte mapped to a printable surrogate
//! symbol from the vocabulary before merges run.

pub mod byte_level;

pub use byte_level::{byte_symbol, symbol_byte, ByteLevelEncoder, ByteSymbolTable};

//! Byte-level BPE encoding (GPT-2 style).
//!
//! Every byte value is represented by a printable surrogate character so that
//! BPE can run over arbitrary bytes. Bytes in `[33, 126]`, `[161, 172]` and
//! `[174, 255]` stand for themselves; the remaining 68 bytes (controls, space,
//! DEL, NBSP, soft hyphen) take consecutive code points starting at U+0100 in
//! byte order, so space becomes `Ġ` and newline becomes `Ċ`.

use crate::core::merges::MergeRules;
use crate::core::vocab::Vocabulary;
use crate::error::{Result, TokenizerError};
use std::sync::OnceLock;

/// One past the highest code point used by a byte symbol.
const SYMBOL_LIMIT: usize = 256 + 68;

fn is_printable(byte: u8) -> bool {
    matches!(byte, 33..=126 | 161..=172 | 174..=255)
}

fn byte_to_char() -> &'static [char; 256] {
    static TABLE: OnceLock<[char; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = ['\0'; 256];
        let mut next = 256u32;
        for byte in 0..=255u8 {
            table[byte as usize] = if is_printable(byte) {
                char::from(byte)
            } else {
                let ch = char::from_u32(next).unwrap_or(char::REPLACEMENT_CHARACTER);
                next += 1;
                ch
            };
        }
        table
    })
}

fn char_to_byte() -> &'static [Option<u8>; SYMBOL_LIMIT] {
    static TABLE: OnceLock<[Option<u8>; SYMBOL_LIMIT]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [None; SYMBOL_LIMIT];
        for (byte, &ch) in byte_to_char().iter().enumerate() {
            table[ch as usize] = Some(byte as u8);
        }
        table
    })
}

/// Surrogate character for a byte value.
#[inline]
pub fn byte_symbol(byte: u8) -> char {
    byte_to_char()[byte as usize]
}

/// Byte value represented by a surrogate character, if it is one.
#[inline]
pub fn symbol_byte(ch: char) -> Option<u8> {
    char_to_byte().get(ch as usize).copied().flatten()
}

/// Table from byte value to the vocabulary id of its surrogate character.
#[derive(Debug, Clone)]
pub struct ByteSymbolTable {
    ids: [u32; 256],
}

impl ByteSymbolTable {
    /// Resolve all 256 byte symbols through the vocabulary.
    ///
    /// Every symbol must already be present; well-formed byte-level
    /// vocabularies always contain them.
    pub fn from_vocab(vocab: &Vocabulary) -> Result<Self> {
        let mut ids = [0u32; 256];
        let mut buf = [0u8; 4];

        for byte in 0..=255u8 {
            let symbol = byte_symbol(byte);
            ids[byte as usize] = vocab
                .get_id(symbol.encode_utf8(&mut buf))
                .ok_or(TokenizerError::MissingByteSymbol { byte, symbol })?;
        }

        Ok(Self { ids })
    }

    /// Vocabulary id for a byte.
    #[inline]
    pub fn id(&self, byte: u8) -> u32 {
        self.ids[byte as usize]
    }

    /// One id per byte of `text`, in order.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        text.bytes().map(|b| self.id(b)).collect()
    }
}

/// Byte-level BPE encoder.
///
/// This encoder:
/// 1. Converts a fragment to UTF-8 bytes
/// 2. Maps each byte to its byte-symbol id
/// 3. Applies BPE merge rules until none applies
#[derive(Debug, Clone)]
pub struct ByteLevelEncoder {
    /// Byte value -> vocabulary id
    table: ByteSymbolTable,
    /// Merge rules: pair -> (rank, new_token_id)
    merges: MergeRules,
}

impl ByteLevelEncoder {
    /// Create a new byte-level encoder.
    pub fn new(table: ByteSymbolTable, merges: MergeRules) -> Self {
        Self { table, merges }
    }

    /// Encode one pre-tokenized fragment into merged token ids.
    ///
    /// The working sequence is owned by the call, so one encoder can serve
    /// concurrent callers.
    pub fn encode(&self, fragment: &str) -> Vec<u32> {
        let mut tokens = self.table.encode(fragment);
        self.merges.apply(&mut tokens);
        tokens
    }

    pub fn table(&self) -> &ByteSymbolTable {
        &self.table
    }

    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// Append the raw bytes a token string stands for.
    ///
    /// Characters that are not byte symbols contribute their own UTF-8 bytes.
    pub fn decode_token(token: &str, out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        for ch in token.chars() {
            match symbol_byte(ch) {
                Some(byte) => out.push(byte),
                None => out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    /// Vocabulary holding the 256 byte symbols with id == byte value.
    fn byte_vocab() -> Vocabulary {
        Vocabulary::from_entries(
            (0..=255u8).map(|b| (byte_symbol(b).to_string(), b as u32)),
            "<unk>",
        )
        .unwrap()
    }

    #[test]
    fn test_symbol_mapping() {
        assert_eq!(byte_symbol(b'a'), 'a');
        assert_eq!(byte_symbol(b'!'), '!');
        assert_eq!(byte_symbol(0xA1), '\u{A1}');
        assert_eq!(byte_symbol(0), '\u{100}');
        assert_eq!(byte_symbol(b' '), '\u{120}');
        assert_eq!(byte_symbol(b'\n'), '\u{10A}');
        assert_eq!(byte_symbol(127), '\u{121}');
        assert_eq!(byte_symbol(0xAD), '\u{143}');
    }

    #[test]
    fn test_symbols_are_a_bijection() {
        let symbols: AHashSet<char> = (0..=255u8).map(byte_symbol).collect();
        assert_eq!(symbols.len(), 256);

        for byte in 0..=255u8 {
            assert_eq!(symbol_byte(byte_symbol(byte)), Some(byte));
        }
        assert_eq!(symbol_byte('\u{144}'), None);
        assert_eq!(symbol_byte(' '), None);
    }

    #[test]
    fn test_table_ids_are_distinct() {
        // Shuffle ids so the table cannot be the identity by accident.
        let vocab = Vocabulary::from_entries(
            (0..=255u8).map(|b| (byte_symbol(b).to_string(), 255 - b as u32)),
            "<unk>",
        )
        .unwrap();
        let table = ByteSymbolTable::from_vocab(&vocab).unwrap();

        let ids: AHashSet<u32> = (0..=255u8).map(|b| table.id(b)).collect();
        assert_eq!(ids.len(), 256);
        assert_eq!(table.id(0), 255);
    }

    #[test]
    fn test_missing_symbol() {
        let vocab = Vocabulary::from_entries(
            (1..=255u8).map(|b| (byte_symbol(b).to_string(), b as u32 - 1)),
            "<unk>",
        )
        .unwrap();

        let err = ByteSymbolTable::from_vocab(&vocab).unwrap_err();
        assert!(matches!(
            err,
            TokenizerError::MissingByteSymbol { byte: 0, symbol: '\u{100}' }
        ));
    }

    #[test]
    fn test_encode_counts_bytes() {
        let table = ByteSymbolTable::from_vocab(&byte_vocab()).unwrap();

        assert_eq!(table.encode("ab"), vec![97, 98]);
        // U+00E9 is two bytes in UTF-8.
        assert_eq!(table.encode("\u{e9}"), vec![0xC3, 0xA9]);
        assert!(table.encode("").is_empty());
    }

    #[test]
    fn test_encoder_applies_merges() {
        let mut vocab = byte_vocab();
        let table = ByteSymbolTable::from_vocab(&vocab).unwrap();
        let merges = MergeRules::parse("\u{120} h\n\u{120}h i\n", &mut vocab).unwrap();
        let encoder = ByteLevelEncoder::new(table, merges);

        let ids = encoder.encode(" hi");
        assert_eq!(ids.len(), 1);
        assert_eq!(vocab.get_token(ids[0]), Some("\u{120}hi"));
    }

    #[test]
    fn test_decode_token() {
        let mut out = Vec::new();
        ByteLevelEncoder::decode_token("\u{120}h\u{10A}", &mut out);
        ByteLevelEncoder::decode_token("\u{c3}\u{a9}", &mut out);
        assert_eq!(out, " h\n\u{e9}".as_bytes());
    }
}

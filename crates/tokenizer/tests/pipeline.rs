//! End-to-end tokenization properties on a small GPT-2 style model.

use bytebpe_tokenizer::{byte_symbol, Tokenizer, TokenizerError};
use std::sync::Arc;
use std::thread;

const MERGES: &str = "\
#version: 0.2
\u{120} t
h e
\u{120}t he
i n
\u{120} w
o r
\u{120}w or
l d
\u{120}wor ld
";

fn byte_vocab() -> Vec<(String, u32)> {
    (0..=255u8)
        .map(|b| (byte_symbol(b).to_string(), b as u32))
        .collect()
}

fn gpt2_like() -> Tokenizer {
    Tokenizer::builder()
        .special_tokens("<sos> <eos>")
        .build(byte_vocab(), MERGES)
        .unwrap()
}

#[test]
fn test_deterministic() {
    let tokenizer = gpt2_like();
    let text = "<sos> the world in the world <eos>";

    let first = tokenizer.tokenize(text, 64);
    for _ in 0..10 {
        assert_eq!(tokenizer.tokenize(text, 64), first);
    }
}

#[test]
fn test_tokenize_sentence() {
    let tokenizer = gpt2_like();
    assert_eq!(
        tokenizer.tokenize("<sos> the world<eos>", usize::MAX),
        vec!["<sos>", "\u{120}the", "\u{120}world", "<eos>"]
    );
}

#[test]
fn test_special_token_atomicity() {
    let tokenizer = gpt2_like();
    let tokens = tokenizer.tokenize("<sos> hi <eos>", usize::MAX);

    assert_eq!(tokens.first().map(String::as_str), Some("<sos>"));
    assert_eq!(tokens.last().map(String::as_str), Some("<eos>"));
    assert_eq!(tokens.iter().filter(|t| t.contains('<')).count(), 2);
}

#[test]
fn test_registration_order_precedence() {
    let first = Tokenizer::builder()
        .special_tokens("<a|b> b|c>")
        .build(byte_vocab(), "")
        .unwrap();
    assert_eq!(
        first.tokenize("<a|b|c>", usize::MAX),
        vec!["<a|b>", "|", "c", ">"]
    );

    let second = Tokenizer::builder()
        .special_tokens("b|c> <a|b>")
        .build(byte_vocab(), "")
        .unwrap();
    assert_eq!(
        second.tokenize("<a|b|c>", usize::MAX),
        vec!["<", "a", "|", "b|c>"]
    );
}

#[test]
fn test_cap_respected() {
    let tokenizer = gpt2_like();
    let text = "<sos> in the world, the world is in order <eos>";

    for cap in [0, 1, 2, 3, 5, 8, 13, 100] {
        assert!(tokenizer.encode(text, cap).len() <= cap);
    }
    assert!(tokenizer.encode(text, 0).is_empty());
}

#[test]
fn test_fixed_point() {
    let tokenizer = gpt2_like();
    let text = "the world in order";

    let tokens = tokenizer.tokenize(text, usize::MAX);
    // Feeding each token back in through its bytes performs no further merges.
    for token in &tokens {
        let id = tokenizer.token_to_id(token).unwrap();
        let bytes = tokenizer.decode(&[id]).unwrap();
        assert_eq!(tokenizer.tokenize(&bytes, usize::MAX), vec![token.clone()]);
    }
}

#[test]
fn test_plain_ascii_without_merges() {
    let tokenizer = Tokenizer::builder().build(byte_vocab(), "").unwrap();
    let text = "Hello, World 42!";

    let tokens = tokenizer.tokenize(text, usize::MAX);
    assert_eq!(tokens.len(), text.len());

    let expected: Vec<String> = text.bytes().map(|b| byte_symbol(b).to_string()).collect();
    assert_eq!(tokens, expected);
}

#[test]
fn test_long_whitespace_run_loses_nothing() {
    let tokenizer = Tokenizer::builder().build(byte_vocab(), "").unwrap();
    let text = format!("{}a", " ".repeat(1_000_020));

    let ids = tokenizer.encode(&text, usize::MAX);
    assert_eq!(ids.len(), text.len());
    assert_eq!(tokenizer.decode(&ids).unwrap(), text);
}

#[test]
fn test_multibyte_emits_one_symbol_per_byte() {
    let tokenizer = Tokenizer::builder().build(byte_vocab(), "").unwrap();

    // U+4F60 is three bytes: E4 BD A0
    let ids = tokenizer.encode("\u{4f60}", usize::MAX);
    assert_eq!(ids, vec![0xE4, 0xBD, 0xA0]);
    assert_eq!(tokenizer.decode(&ids).unwrap(), "\u{4f60}");
}

#[test]
fn test_missing_byte_symbol_is_fatal() {
    let vocab: Vec<(String, u32)> = ('a'..='z')
        .enumerate()
        .map(|(i, c)| (c.to_string(), i as u32))
        .collect();

    let err = Tokenizer::builder().build(vocab, "").unwrap_err();
    assert!(matches!(err, TokenizerError::MissingByteSymbol { .. }));
}

#[test]
fn test_shared_across_threads() {
    let tokenizer = Arc::new(gpt2_like());
    let text = "<sos> the world in the world <eos>";
    let expected = tokenizer.encode(text, usize::MAX);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tokenizer = Arc::clone(&tokenizer);
            thread::spawn(move || {
                (0..100)
                    .map(|_| tokenizer.encode(text, usize::MAX))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for ids in handle.join().unwrap() {
            assert_eq!(ids, expected);
        }
    }
}

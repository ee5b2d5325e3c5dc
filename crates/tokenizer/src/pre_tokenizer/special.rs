//! Special-token segmentation.
//!
//! Input is cut into literal special tokens and free-text spans before any
//! other processing. Tokens are applied in registration order, each one only
//! splitting spans that no earlier token has claimed, so when two literals
//! overlap the one registered first wins.

use bytebpe_core::SpecialTokens;

/// A span of input, either a special token or free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The covered input text
    pub text: &'a str,
    /// Special token id, or `None` if the span still needs tokenization
    pub special: Option<u32>,
}

impl<'a> Segment<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            text,
            special: None,
        }
    }

    fn special(text: &'a str, id: u32) -> Self {
        Self {
            text,
            special: Some(id),
        }
    }
}

/// Split input on registered special tokens, preserving order.
///
/// Free-text spans are never empty; empty input yields no segments.
pub fn split_special_tokens<'a>(special: &SpecialTokens, input: &'a str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    if input.is_empty() {
        return segments;
    }
    segments.push(Segment::text(input));

    for token in special {
        let literal = token.content.as_str();
        let mut next = Vec::with_capacity(segments.len());

        for segment in segments {
            if segment.special.is_some() {
                next.push(segment);
                continue;
            }

            let mut rest = segment.text;
            while let Some(pos) = rest.find(literal) {
                if pos > 0 {
                    next.push(Segment::text(&rest[..pos]));
                }
                let end = pos + literal.len();
                next.push(Segment::special(&rest[pos..end], token.id));
                rest = &rest[end..];
            }
            if !rest.is_empty() {
                next.push(Segment::text(rest));
            }
        }

        segments = next;
    }

    segments
}

//! Text splitting for pre-tokenization.
//!
//! The splitter cuts a span of text into word fragments before byte-level
//! encoding. Each step matches the pattern against the start of the remaining
//! text; when nothing matches there, one character is skipped and the match
//! is retried. A match that runs out of backtracking budget is retried with a
//! budget sized to the remaining text and never causes input to be skipped.

use bytebpe_core::{Result, TokenizerError};
use fancy_regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// GPT-2 pre-tokenization pattern: contractions, letter runs, digit runs,
/// punctuation runs (each with an optional leading space) and whitespace.
pub const GPT2_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

/// Splitting patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPattern {
    /// GPT-2 word pattern
    #[default]
    Gpt2,
    /// Custom regex pattern (fancy-regex syntax)
    Custom(String),
}

impl SplitPattern {
    /// The regex source for this pattern.
    pub fn as_str(&self) -> &str {
        match self {
            SplitPattern::Gpt2 => GPT2_PATTERN,
            SplitPattern::Custom(pattern) => pattern,
        }
    }
}

/// Backtracking budget of the regular matcher (fancy-regex's default).
const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Backtracking steps allowed per byte of remaining text on a retry.
const BACKTRACK_STEPS_PER_BYTE: usize = 16;

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone)]
pub struct Splitter {
    /// Pattern anchored at the start of the remaining text
    regex: Regex,
    /// Anchored source, kept to rebuild the regex with a larger budget
    source: String,
}

impl Splitter {
    /// Compile a splitter for the given pattern.
    pub fn new(pattern: &SplitPattern) -> Result<Self> {
        let source = format!("^(?:{})", pattern.as_str());
        let regex = Self::build(&source, DEFAULT_BACKTRACK_LIMIT)?;

        Ok(Self { regex, source })
    }

    fn build(source: &str, backtrack_limit: usize) -> Result<Regex> {
        RegexBuilder::new(source)
            .backtrack_limit(backtrack_limit)
            .build()
            .map_err(|e| TokenizerError::Pattern(e.to_string()))
    }

    /// Lazily split text into fragments.
    ///
    /// Calling this again on the same text starts over from the beginning.
    pub fn split<'a>(&'a self, text: &'a str) -> Fragments<'a> {
        Fragments {
            splitter: self,
            rest: text,
        }
    }

    /// Length of a non-empty match at the start of `text`.
    ///
    /// Fails only if the pattern exhausts its backtracking budget even after
    /// the budget has been scaled to the length of `text`.
    fn match_len(&self, text: &str) -> std::result::Result<Option<usize>, fancy_regex::Error> {
        match self.regex.find(text) {
            Ok(found) => Ok(Self::prefix_len(found)),
            Err(err) => {
                let limit = text
                    .len()
                    .saturating_mul(BACKTRACK_STEPS_PER_BYTE)
                    .max(DEFAULT_BACKTRACK_LIMIT);
                log::debug!(
                    "pre-tokenizer match failed ({}), retrying with a backtrack limit of {}",
                    err,
                    limit
                );
                let regex = RegexBuilder::new(&self.source)
                    .backtrack_limit(limit)
                    .build()?;
                regex.find(text).map(Self::prefix_len)
            }
        }
    }

    fn prefix_len(found: Option<fancy_regex::Match<'_>>) -> Option<usize> {
        match found {
            Some(m) if m.start() == 0 && m.end() > 0 => Some(m.end()),
            _ => None,
        }
    }
}

/// Iterator over the fragments of a text span.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    splitter: &'a Splitter,
    rest: &'a str,
}

impl<'a> Fragments<'a> {
    fn take(&mut self, len: usize) -> &'a str {
        let (fragment, rest) = self.rest.split_at(len);
        self.rest = rest;
        fragment
    }

    fn first_char_len(&self) -> usize {
        self.rest.chars().next().map_or(self.rest.len(), char::len_utf8)
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            match self.splitter.match_len(self.rest) {
                Ok(Some(len)) => return Some(self.take(len)),
                // Skip a whole code point so multi-byte characters stay intact.
                Ok(None) => {
                    let skip = self.first_char_len();
                    self.rest = &self.rest[skip..];
                }
                // The text may match, but the matcher cannot tell: keep the
                // character as its own fragment rather than lose it.
                Err(err) => {
                    log::warn!("pre-tokenizer gave up on a match: {}", err);
                    let len = self.first_char_len();
                    return Some(self.take(len));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpt2() -> Splitter {
        Splitter::new(&SplitPattern::Gpt2).unwrap()
    }

    #[test]
    fn test_gpt2_words() {
        let splitter = gpt2();
        let result: Vec<&str> = splitter.split("Hello world, it's 2024!").collect();
        assert_eq!(
            result,
            vec!["Hello", " world", ",", " it", "'s", " 2024", "!"]
        );
    }

    #[test]
    fn test_gpt2_contractions() {
        let splitter = gpt2();
        let result: Vec<&str> = splitter.split("we'll they've I'm don't").collect();
        assert_eq!(
            result,
            vec!["we", "'ll", " they", "'ve", " I", "'m", " don", "'t"]
        );
    }

    #[test]
    fn test_gpt2_whitespace_runs() {
        let splitter = gpt2();
        let result: Vec<&str> = splitter.split("a   b\n\n").collect();
        // The last space before a word stays attached to it.
        assert_eq!(result, vec!["a", "  ", " b", "\n\n"]);
    }

    #[test]
    fn test_gpt2_unicode_letters() {
        let splitter = gpt2();
        let result: Vec<&str> = splitter.split("caf\u{e9} \u{4f60}\u{597d}").collect();
        assert_eq!(result, vec!["caf\u{e9}", " \u{4f60}\u{597d}"]);
    }

    #[test]
    fn test_fragments_cover_input() {
        let splitter = gpt2();
        let text = "  Mixed\tinput: 12ab \u{1F600}?!  ";
        let joined: String = splitter.split(text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_split_is_restartable() {
        let splitter = gpt2();
        let first: Vec<&str> = splitter.split("one two").collect();
        let second: Vec<&str> = splitter.split("one two").collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_string() {
        let splitter = gpt2();
        assert_eq!(splitter.split("").count(), 0);
    }

    #[test]
    fn test_recovery_skips_whole_code_points() {
        // The pattern cannot match U+00E9, so it is skipped as one character
        // rather than one byte at a time.
        let splitter = Splitter::new(&SplitPattern::Custom("[a-z]+".to_string())).unwrap();
        let result: Vec<&str> = splitter.split("h\u{e9}llo w\u{4f60}rld").collect();
        assert_eq!(result, vec!["h", "llo", "w", "rld"]);
    }

    #[test]
    fn test_empty_matches_are_skipped() {
        let splitter = Splitter::new(&SplitPattern::Custom("[a-z]*".to_string())).unwrap();
        let result: Vec<&str> = splitter.split("ab1cd").collect();
        assert_eq!(result, vec!["ab", "cd"]);
    }

    #[test]
    fn test_long_whitespace_run_is_kept() {
        // Long enough to exhaust the default backtracking budget.
        let text = format!("{}a", " ".repeat(1_000_020));
        let splitter = gpt2();
        let result: Vec<&str> = splitter.split(&text).collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].len(), 1_000_019);
        assert_eq!(result[1], " a");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Splitter::new(&SplitPattern::Custom("(".to_string())).unwrap_err();
        assert!(matches!(err, TokenizerError::Pattern(_)));
    }
}

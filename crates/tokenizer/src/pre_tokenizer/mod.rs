//! Pre-tokenization pipeline.
//!
//! This module provides the steps applied before byte-level BPE: special-token
//! segmentation and pattern-based word splitting.

pub mod special;
pub mod split;

pub use special::{split_special_tokens, Segment};
pub use split::{Fragments, SplitPattern, Splitter, GPT2_PATTERN};

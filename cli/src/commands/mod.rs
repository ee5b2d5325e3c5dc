//! CLI commands for the bytebpe tokenizer.

pub mod benchmark;
pub mod decode;
pub mod encode;
pub mod tokenize;

pub use benchmark::BenchmarkCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use tokenize::TokenizeCommand;

use anyhow::{bail, Context, Result};
use bytebpe_tokenizer::{Tokenizer, TokenizerLoader};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

/// Arguments selecting and configuring the model.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Model directory with vocab.json, merges.txt and optional tokenizer_config.json
    #[arg(short, long, value_name = "DIR")]
    pub model: Option<PathBuf>,

    /// Path to vocab.json (overrides the model directory)
    #[arg(long, value_name = "PATH")]
    pub vocab: Option<PathBuf>,

    /// Path to merges.txt (overrides the model directory)
    #[arg(long, value_name = "PATH")]
    pub merges: Option<PathBuf>,

    /// Unknown token
    #[arg(long)]
    pub unk: Option<String>,

    /// Whitespace-separated special tokens, registered after the model's own
    #[arg(long)]
    pub special: Option<String>,
}

impl ModelArgs {
    /// Load the tokenizer described by these arguments.
    pub fn load(&self) -> Result<Tokenizer> {
        let mut config = match &self.model {
            Some(dir) => TokenizerLoader::config_from_dir(dir)
                .with_context(|| format!("failed to read config from {}", dir.display()))?,
            None => Default::default(),
        };

        if let Some(unk) = &self.unk {
            config.unk_token = unk.clone();
        }
        if let Some(special) = &self.special {
            config
                .special_tokens
                .extend(special.split_whitespace().map(str::to_string));
        }

        let vocab = self.file(&self.vocab, "vocab.json", "--vocab")?;
        let merges = self.file(&self.merges, "merges.txt", "--merges")?;

        TokenizerLoader::from_files(&vocab, &merges, config)
            .with_context(|| format!("failed to load tokenizer from {}", vocab.display()))
    }

    fn file(&self, explicit: &Option<PathBuf>, name: &str, flag: &str) -> Result<PathBuf> {
        match (explicit, &self.model) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(dir)) => Ok(dir.join(name)),
            (None, None) => bail!("either --model or {} is required", flag),
        }
    }
}

/// Read input text, from stdin when `input` is "-".
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        Ok(input.to_string())
    }
}

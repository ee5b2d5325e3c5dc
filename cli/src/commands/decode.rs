//! Decode command implementation.

use super::{read_input, ModelArgs};
use anyhow::{Context, Result};
use clap::Parser;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Whitespace-separated token IDs ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,
}

pub fn run(cmd: DecodeCommand) -> Result<()> {
    let tokenizer = cmd.model.load()?;
    let input = read_input(&cmd.input)?;

    let ids = input
        .split_whitespace()
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("invalid token id {:?}", s))
        })
        .collect::<Result<Vec<_>>>()?;

    let text = tokenizer.decode(&ids)?;
    print!("{}", text);

    Ok(())
}

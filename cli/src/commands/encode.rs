//! Encode command implementation.

use super::{read_input, ModelArgs};
use anyhow::{Context, Result};
use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Maximum number of tokens to emit (unbounded if omitted)
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(cmd: EncodeCommand) -> Result<()> {
    let tokenizer = cmd.model.load()?;
    let text = read_input(&cmd.input)?;

    let ids = tokenizer.encode(&text, cmd.max_tokens.unwrap_or(usize::MAX));
    let output = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output).with_context(|| format!("failed to write {}", path))?;
            log::info!("encoded {} tokens to {}", ids.len(), path);
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

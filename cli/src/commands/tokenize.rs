//! Tokenize command implementation.

use super::{read_input, ModelArgs};
use anyhow::Result;
use clap::Parser;

/// Tokenize command arguments.
#[derive(Parser)]
pub struct TokenizeCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Text to tokenize ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Maximum number of tokens to emit (unbounded if omitted)
    #[arg(long)]
    pub max_tokens: Option<usize>,
}

pub fn run(cmd: TokenizeCommand) -> Result<()> {
    let tokenizer = cmd.model.load()?;
    let text = read_input(&cmd.input)?;

    for token in tokenizer.tokenize(&text, cmd.max_tokens.unwrap_or(usize::MAX)) {
        println!("{}", token);
    }

    Ok(())
}

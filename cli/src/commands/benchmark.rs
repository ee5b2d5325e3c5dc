//! Benchmark command implementation.

use super::ModelArgs;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::time::Instant;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

pub fn run(cmd: BenchmarkCommand) -> Result<()> {
    let tokenizer = cmd.model.load()?;
    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input))?;
    let iterations = cmd.iterations.max(1);

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", iterations);
    println!();

    // Warmup
    let tokens = tokenizer.encode(&text, usize::MAX).len();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = tokenizer.encode(&text, usize::MAX);
    }
    let elapsed = start.elapsed();

    let avg_secs = elapsed.as_secs_f64() / iterations as f64;

    println!("Results:");
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    println!("  Tokens per pass: {}", tokens);
    println!("  Throughput: {:.0} tokens/s", tokens as f64 / avg_secs.max(f64::EPSILON));

    Ok(())
}

//! ttt-sarsa CLI - tabular self-play learning for tic-tac-toe
//!
//! This CLI provides:
//! - Self-play training of the value table
//! - Evaluation of the greedy policy against a random player

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt-sarsa")]
#[command(version, about = "Self-play value learning for tic-tac-toe", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the value table by self-play
    Train(ttt_sarsa::cli::commands::train::TrainArgs),

    /// Train, then evaluate the greedy policy against a random player
    Evaluate(ttt_sarsa::cli::commands::evaluate::EvaluateArgs),
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Train(args) => ttt_sarsa::cli::commands::train::execute(args),
        Commands::Evaluate(args) => ttt_sarsa::cli::commands::evaluate::execute(args),
    }
}

//! Evaluate command - train, then play the greedy policy against a random player

use std::{fs::File, path::PathBuf};

use anyhow::{Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        commands::train::{TrainingFlags, print_evaluation, print_training_report, train_table},
        output::format_number,
    },
    pipeline::{EvaluationConfig, EvaluationPipeline, EvaluationResult, RandomLearner},
    q_learning::{QTable, SarsaLearner, TrainingReport},
    tictactoe::Player,
};

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" => Ok(Player::X),
        "o" | "second" | "player2" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train, then evaluate the greedy policy against a random player")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub training: TrainingFlags,

    /// Number of evaluation games per side
    #[arg(long, default_value_t = 100)]
    pub eval_games: usize,

    /// Which token the evaluated agent controls (`x` or `o`); both if omitted
    #[arg(long)]
    pub agent_player: Option<String>,

    /// Export results to file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationExport {
    training: TrainingReport,
    evaluations: Vec<SideResult>,
}

#[derive(Debug, Serialize)]
struct SideResult {
    agent_player: Player,
    result: EvaluationResult,
}

/// Play `num_games` greedy games from `agent_player`'s seat against a random player
pub fn evaluate_table(
    table: &QTable,
    agent_player: Player,
    num_games: usize,
    seed: u64,
) -> Result<EvaluationResult> {
    let mut agent = SarsaLearner::new(table.clone(), "SARSA".to_string());
    let mut opponent = RandomLearner::new("Random".to_string());
    let mut pipeline = EvaluationPipeline::new(EvaluationConfig {
        num_games,
        seed,
        agent_player,
    });
    Ok(pipeline.run(&mut agent, &mut opponent)?)
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let sides = match &args.agent_player {
        Some(token) => vec![parse_player_token(token, "--agent-player")?],
        None => Player::ALL.to_vec(),
    };
    let config = args.training.resolve()?;

    println!(
        "Training for {} self-play games...",
        format_number(config.num_games)
    );
    let (report, table) = train_table(config.clone(), !args.training.no_progress)?;
    print_training_report(&config, &report);

    let eval_seed = config.seed.wrapping_add(config.num_games as u64);
    let mut evaluations = Vec::with_capacity(sides.len());
    for agent_player in sides {
        let result = evaluate_table(&table, agent_player, args.eval_games, eval_seed)?;
        print_evaluation(
            &format!("Greedy policy as {agent_player} vs Random"),
            &result,
        );
        evaluations.push(SideResult {
            agent_player,
            result,
        });
    }

    if let Some(path) = args.export {
        let export = EvaluationExport {
            training: report,
            evaluations,
        };
        to_writer_pretty(File::create(&path)?, &export)?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}

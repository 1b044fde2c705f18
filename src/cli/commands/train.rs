//! Train command - self-play training of the value table

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        config::{TrainingOverrides, resolve_training_config},
        output::{format_number, format_share, print_kv, print_move_values, print_section},
    },
    pipeline::{
        EvaluationConfig, EvaluationPipeline, EvaluationResult, ProgressObserver, RandomLearner,
    },
    q_learning::{QTable, SarsaLearner, SelfPlayTrainer, TrainingConfig, TrainingReport},
    tictactoe::{GameState, Player},
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    config: TrainingConfig,
    training: TrainingReport,
    validation: Option<EvaluationResult>,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Training parameters shared by every command that trains a table
#[derive(clap::Args, Debug, Clone)]
pub struct TrainingFlags {
    /// JSON file with a training configuration
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of self-play games
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Exploration rate in [0, 1)
    #[arg(long, short = 'e')]
    pub epsilon: Option<f64>,

    /// Learning rate in (0, 1]
    #[arg(long, short = 'l')]
    pub learning_rate: Option<f64>,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl TrainingFlags {
    fn overrides(&self) -> TrainingOverrides {
        TrainingOverrides {
            games: self.games,
            epsilon: self.epsilon,
            learning_rate: self.learning_rate,
            seed: self.seed,
        }
    }

    /// Effective configuration: file values, then flags
    pub fn resolve(&self) -> Result<TrainingConfig> {
        Ok(resolve_training_config(
            self.config.as_deref(),
            &self.overrides(),
        )?)
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the value table by self-play")]
pub struct TrainArgs {
    #[command(flatten)]
    pub training: TrainingFlags,

    /// Games the greedy policy plays as X against a random player afterwards
    #[arg(long, default_value_t = 0)]
    pub validation_games: usize,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

/// Run self-play training and return the report and the learned table
pub fn train_table(config: TrainingConfig, show_progress: bool) -> Result<(TrainingReport, QTable)> {
    let mut trainer = SelfPlayTrainer::new(config)?;
    if show_progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    let report = trainer.train()?;
    Ok((report, trainer.into_q_table()))
}

pub(crate) fn print_training_report(config: &TrainingConfig, report: &TrainingReport) {
    print_section("Training Results");
    print_kv("Games", &format_number(report.total_games));
    print_kv("Epsilon", &config.epsilon.to_string());
    print_kv("Learning rate", &config.learning_rate.to_string());
    print_kv("Seed", &config.seed.to_string());
    print_kv("X wins", &format_share(report.x_wins, report.total_games));
    print_kv("O wins", &format_share(report.o_wins, report.total_games));
    print_kv("Draws", &format_share(report.draws, report.total_games));
    print_kv("Table entries", &format_number(report.table_size));
    print_kv("Distinct states", &format_number(report.state_count));
}

pub(crate) fn print_evaluation(title: &str, result: &EvaluationResult) {
    print_section(title);
    print_kv("Games", &format_number(result.total_games));
    print_kv("Wins", &format_share(result.wins, result.total_games));
    print_kv("Draws", &format_share(result.draws, result.total_games));
    print_kv("Losses", &format_share(result.losses, result.total_games));
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.training.resolve()?;
    let summary_path = args.summary.as_deref().map(sanitize_summary_path);

    println!(
        "Training for {} self-play games...",
        format_number(config.num_games)
    );
    let (report, table) = train_table(config.clone(), !args.training.no_progress)?;
    print_training_report(&config, &report);

    print_section("Opening Move Values");
    let opening = GameState::new();
    print_move_values(&table.action_values(&opening.key(), &opening.legal_actions()));

    let validation = if args.validation_games > 0 {
        let mut agent = SarsaLearner::new(table, "SARSA".to_string());
        let mut opponent = RandomLearner::new("Random".to_string());
        let mut pipeline = EvaluationPipeline::new(EvaluationConfig {
            num_games: args.validation_games,
            seed: config.seed.wrapping_add(config.num_games as u64),
            agent_player: Player::X,
        });
        let result = pipeline.run(&mut agent, &mut opponent)?;
        print_evaluation("Validation vs Random (agent as X)", &result);
        Some(result)
    } else {
        None
    };

    if let Some(summary_path) = summary_path {
        if let Some(parent) = summary_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let summary = TrainingSummaryFile {
            config,
            training: report,
            validation,
        };
        let file = File::create(&summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}

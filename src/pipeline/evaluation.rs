//! Match play between two learners

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    ports::{Learner, Observer},
    tictactoe::{GameOutcome, Player, PlayerResult, TicTacToeEnv},
};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation games
    pub num_games: usize,

    /// Base seed; game `i` is seeded with `seed + i`
    pub seed: u64,

    /// Whether the evaluated agent plays as X or O
    pub agent_player: Player,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            seed: 0,
            agent_player: Player::X,
        }
    }
}

/// Result of an evaluation run, from the agent's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Total games played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl EvaluationResult {
    /// Create a new evaluation result
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }
}

/// Plays a fixed number of games between an agent and an opponent
pub struct EvaluationPipeline {
    config: EvaluationConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl EvaluationPipeline {
    /// Create a new evaluation pipeline
    pub fn new(config: EvaluationConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play all games and tally them from the agent's side
    pub fn run(
        &mut self,
        agent: &mut dyn Learner,
        opponent: &mut dyn Learner,
    ) -> Result<EvaluationResult> {
        let mut env = TicTacToeEnv::new();
        let (mut wins, mut draws, mut losses) = (0, 0, 0);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let seed = self.config.seed.wrapping_add(game_num as u64);
            let outcome = play_game(&mut env, seed, self.config.agent_player, agent, opponent)?;

            match outcome.result_for(self.config.agent_player) {
                PlayerResult::Win => wins += 1,
                PlayerResult::Draw => draws += 1,
                PlayerResult::Loss => losses += 1,
            }

            for observer in &mut self.observers {
                observer.on_game_end(game_num, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        info!(
            agent = agent.name(),
            opponent = opponent.name(),
            agent_player = %self.config.agent_player,
            wins,
            draws,
            losses,
            "evaluation finished"
        );

        Ok(EvaluationResult::new(
            self.config.num_games,
            wins,
            draws,
            losses,
        ))
    }
}

/// Play one game to the end; `agent` moves whenever `agent_player` is to move.
pub fn play_game(
    env: &mut TicTacToeEnv,
    seed: u64,
    agent_player: Player,
    agent: &mut dyn Learner,
    opponent: &mut dyn Learner,
) -> Result<GameOutcome> {
    env.reset(Some(seed));

    loop {
        let state = *env.state();
        if let Some(outcome) = state.outcome() {
            debug!(seed, outcome = ?outcome, "evaluation game finished");
            return Ok(outcome);
        }

        let action = if state.to_move() == agent_player {
            agent.select_move(&state, env.rng_mut())?
        } else {
            opponent.select_move(&state, env.rng_mut())?
        };
        env.step(action)?;
    }
}

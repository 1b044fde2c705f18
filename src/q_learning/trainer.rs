//! Self-play training with a backward pass over per-player returns
//!
//! Both sides of every game are played by the same epsilon-greedy policy over
//! one shared [`QTable`]. After the game, each player's moves are updated
//! toward the undiscounted sum of that player's own rewards from the move to
//! the end of the game (an every-visit Monte Carlo return).

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    config::{RewardScheme, TrainingConfig},
    policy::EpsilonGreedy,
    q_table::QTable,
};
use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{GameOutcome, GameState, Player, StateKey, TicTacToeEnv},
};

/// One player's moves and rewards during a single game.
///
/// `rewards` holds one immediate reward per move plus, once the game is over,
/// the terminal reward appended after the last one. It is therefore one
/// element longer than `steps` for a finished game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    steps: Vec<(StateKey, usize)>,
    rewards: Vec<f64>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move and its immediate reward
    pub fn record(&mut self, state: StateKey, action: usize, reward: f64) {
        self.steps.push((state, action));
        self.rewards.push(reward);
    }

    /// Append the end-of-game reward after the per-move rewards
    pub fn append_terminal(&mut self, reward: f64) {
        self.rewards.push(reward);
    }

    pub fn steps(&self) -> &[(StateKey, usize)] {
        &self.steps
    }

    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Number of recorded moves
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Return from each move: the sum of `rewards[i..]`, summed front to back
    pub fn returns(&self) -> Vec<f64> {
        (0..self.steps.len())
            .map(|i| self.rewards[i..].iter().sum())
            .collect()
    }
}

/// A finished self-play game with both players' trajectories
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    trajectories: [Trajectory; 2],
    outcome: GameOutcome,
    final_state: GameState,
}

impl Episode {
    fn finish(
        mut trajectories: [Trajectory; 2],
        final_state: GameState,
        outcome: GameOutcome,
        rewards: &RewardScheme,
    ) -> Self {
        for player in Player::ALL {
            trajectories[player.index()].append_terminal(rewards.terminal(outcome, player));
        }
        Self {
            trajectories,
            outcome,
            final_state,
        }
    }

    /// Rebuild an episode from a complete move list starting on the empty board.
    ///
    /// # Errors
    ///
    /// - [`Error::IllegalAction`] / [`Error::GameOver`] for an invalid move list
    /// - [`Error::UnfinishedGame`] if the moves do not reach a terminal position
    pub fn replay(moves: &[usize], rewards: &RewardScheme) -> Result<Self> {
        let mut trajectories = [Trajectory::new(), Trajectory::new()];
        let mut state = GameState::new();

        for &action in moves {
            let next = state.transition(action)?;
            trajectories[state.to_move().index()].record(state.key(), action, rewards.step);
            state = next;
        }

        let outcome = state
            .outcome()
            .ok_or(Error::UnfinishedGame { moves: moves.len() })?;
        Ok(Self::finish(trajectories, state, outcome, rewards))
    }

    pub fn trajectory(&self, player: Player) -> &Trajectory {
        &self.trajectories[player.index()]
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn final_state(&self) -> &GameState {
        &self.final_state
    }

    /// Total number of moves played
    pub fn len(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Update every recorded (state, action) pair toward its return.
///
/// X's moves are processed before O's, each in the order they were played.
pub fn backward_pass(table: &mut QTable, episode: &Episode, learning_rate: f64) {
    for player in Player::ALL {
        let trajectory = episode.trajectory(player);
        for (&(state, action), target) in trajectory.steps().iter().zip(trajectory.returns()) {
            table.update_toward(state, action, target, learning_rate);
        }
    }
}

/// Outcome tally of a training run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Number of (state, action) entries in the table
    pub table_size: usize,
    /// Number of distinct states in the table
    pub state_count: usize,
}

impl TrainingReport {
    fn record(&mut self, outcome: GameOutcome) {
        self.total_games += 1;
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Drives self-play games and owns the value table they update.
///
/// # Examples
///
/// ```
/// use ttt_sarsa::q_learning::{SelfPlayTrainer, TrainingConfig};
///
/// let config = TrainingConfig::new(200).with_seed(7);
/// let mut trainer = SelfPlayTrainer::new(config).unwrap();
/// let report = trainer.train().unwrap();
///
/// assert_eq!(report.total_games, 200);
/// assert!(!trainer.q_table().is_empty());
/// ```
pub struct SelfPlayTrainer {
    config: TrainingConfig,
    policy: EpsilonGreedy,
    q_table: QTable,
    env: TicTacToeEnv,
    games_played: usize,
    observers: Vec<Box<dyn Observer>>,
}

impl SelfPlayTrainer {
    /// Create a trainer with an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the config fails validation.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            policy: EpsilonGreedy::new(config.epsilon)?,
            env: TicTacToeEnv::new().with_step_reward(config.rewards.step),
            config,
            q_table: QTable::new(),
            games_played: 0,
            observers: Vec::new(),
        })
    }

    /// Add an observer notified after every game
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Games completed in the current run
    pub fn games_played(&self) -> usize {
        self.games_played
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Hand over the learned table
    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    /// Run `num_games` self-play games from an empty table.
    ///
    /// Any previously learned values are discarded first.
    pub fn train(&mut self) -> Result<TrainingReport> {
        self.q_table.reset();
        self.games_played = 0;

        let num_games = self.config.num_games;
        let mut report = TrainingReport::default();

        for observer in &mut self.observers {
            observer.on_training_start(num_games)?;
        }

        while self.games_played < num_games {
            let game_num = self.games_played;
            let episode = self.play_episode()?;
            self.learn(&episode);
            report.record(episode.outcome());

            for observer in &mut self.observers {
                observer.on_game_end(game_num, episode.outcome())?;
            }

            if self.games_played.is_multiple_of(self.config.progress_interval) {
                info!(
                    games = self.games_played,
                    table_size = self.q_table.size(),
                    "Learning completed for {}/{} games.",
                    self.games_played,
                    num_games
                );
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        report.table_size = self.q_table.size();
        report.state_count = self.q_table.state_count();
        Ok(report)
    }

    /// Play one self-play game without updating the table.
    ///
    /// The game is seeded from the base seed plus the number of games played
    /// so far. The policy's lazy initialization still inserts every pair it
    /// reads.
    pub fn play_episode(&mut self) -> Result<Episode> {
        let seed = self.config.episode_seed(self.games_played);
        self.env.reset(Some(seed));
        let mut trajectories = [Trajectory::new(), Trajectory::new()];

        let outcome = loop {
            let state = *self.env.state();
            if let Some(outcome) = state.outcome() {
                break outcome;
            }

            let action = self
                .policy
                .select_action(&state, &mut self.q_table, self.env.rng_mut())?;
            let step = self.env.step(action)?;
            trajectories[state.to_move().index()].record(state.key(), action, step.reward);
        };

        debug!(
            game = self.games_played,
            seed,
            outcome = ?outcome,
            moves = self.env.state().move_count(),
            "self-play game finished"
        );

        Ok(Episode::finish(
            trajectories,
            *self.env.state(),
            outcome,
            &self.config.rewards,
        ))
    }

    /// Apply the backward pass for a finished game and count it as played
    pub fn learn(&mut self, episode: &Episode) {
        backward_pass(&mut self.q_table, episode, self.config.learning_rate);
        self.games_played += 1;
    }
}

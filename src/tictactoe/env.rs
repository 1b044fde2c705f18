//! Episodic environment wrapper around [`GameState`]
//!
//! Exposes the usual `reset`/`step` interaction contract and owns the seeded
//! random source that policies draw from during an episode.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::board::{BOARD_SIZE, Cell, GameState, Player};
use crate::{Error, Result};

/// Reward returned for every move, regardless of its consequence
pub const STEP_REWARD: f64 = -0.01;

/// What an agent observes about the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub board: [Cell; BOARD_SIZE],
    pub turn: Player,
}

/// Auxiliary information returned alongside every observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub legal_actions: Vec<usize>,
    pub move_count: u32,
}

/// Result of a single [`TicTacToeEnv::step`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    /// Always `false`: the game has no step limit
    pub truncated: bool,
    pub info: StepInfo,
}

/// Tic-Tac-Toe environment holding the live position of one episode
#[derive(Debug, Clone)]
pub struct TicTacToeEnv {
    state: GameState,
    rng: StdRng,
    step_reward: f64,
}

impl TicTacToeEnv {
    /// Create an environment with an entropy-seeded random source.
    ///
    /// Call [`reset`](Self::reset) with a seed for reproducible episodes.
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            rng: StdRng::from_rng(&mut rand::rng()),
            step_reward: STEP_REWARD,
        }
    }

    /// Override the per-move reward
    pub fn with_step_reward(mut self, step_reward: f64) -> Self {
        self.step_reward = step_reward;
        self
    }

    /// Start a new episode.
    ///
    /// The board is always empty with X to move; `seed` only re-seeds the
    /// random source used by policies acting in this episode. Without a seed
    /// the generator keeps its current stream.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, StepInfo) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.state = GameState::new();
        (self.observation(), self.info())
    }

    /// Apply `action` for the player to move.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the episode has already terminated
    /// - [`Error::IllegalAction`] if the cell is occupied or out of range;
    ///   the environment is left unchanged
    pub fn step(&mut self, action: usize) -> Result<Step> {
        if self.state.is_terminal() {
            return Err(Error::GameOver);
        }

        self.state = self.state.transition(action)?;

        Ok(Step {
            observation: self.observation(),
            reward: self.step_reward,
            terminated: self.state.is_terminal(),
            truncated: false,
            info: self.info(),
        })
    }

    /// Current position
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn legal_actions(&self) -> Vec<usize> {
        self.state.legal_actions()
    }

    pub fn is_winner(&self, player: Player) -> bool {
        self.state.is_winner(player)
    }

    /// Random source of the current episode
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn observation(&self) -> Observation {
        Observation {
            board: *self.state.cells(),
            turn: self.state.to_move(),
        }
    }

    fn info(&self) -> StepInfo {
        StepInfo {
            legal_actions: self.state.legal_actions(),
            move_count: self.state.move_count(),
        }
    }
}

impl Default for TicTacToeEnv {
    fn default() -> Self {
        Self::new()
    }
}

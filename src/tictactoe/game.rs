//! Game outcomes seen from either side of the board

use serde::{Deserialize, Serialize};

use super::board::Player;

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Outcome from one player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerResult {
    Win,
    Loss,
    Draw,
}

impl GameOutcome {
    /// How the game ended for `player`
    pub fn result_for(self, player: Player) -> PlayerResult {
        match self {
            GameOutcome::Win(winner) if winner == player => PlayerResult::Win,
            GameOutcome::Win(_) => PlayerResult::Loss,
            GameOutcome::Draw => PlayerResult::Draw,
        }
    }
}

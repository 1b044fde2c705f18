//! Tic-Tac-Toe game implementation

pub mod board;
pub mod env;
pub mod game;
pub mod lines;

pub use board::{BOARD_SIZE, CELL_NAMES, Cell, GameState, Player, StateKey};
pub use env::{Observation, STEP_REWARD, Step, StepInfo, TicTacToeEnv};
pub use game::{GameOutcome, PlayerResult};
pub use lines::{LineAnalyzer, WINNING_LINES};

//! Tabular self-play value learning for tic-tac-toe
//!
//! This crate provides:
//! - A tic-tac-toe state machine and a seeded episodic environment
//! - A lazily populated state-action value table
//! - Epsilon-greedy action selection
//! - A self-play trainer applying Monte-Carlo returns after every game
//! - Match play against baseline learners, and a CLI around it all

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};

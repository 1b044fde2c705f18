//! CLI infrastructure for the tic-tac-toe self-play learner
//!
//! This module provides the command-line interface for training the value
//! table and evaluating the resulting greedy policy.

pub mod commands;
pub mod config;
pub mod output;

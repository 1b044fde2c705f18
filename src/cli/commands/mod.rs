//! Command implementations for the CLI

pub mod evaluate;
pub mod train;

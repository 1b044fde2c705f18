//! Tabular self-play value learning
//!
//! The learner keeps a value for every (board, move) pair it has seen and
//! improves it by playing against itself:
//!
//! - [`QTable`] stores the values, creating entries on first read
//! - [`EpsilonGreedy`] picks moves, exploring with probability ε
//! - [`SelfPlayTrainer`] plays full games and applies a backward pass
//!
//! ## Update rule
//!
//! Despite the SARSA name, values are not bootstrapped from the successor's
//! estimate. Each move is updated toward the full, undiscounted return of the
//! player who made it:
//!
//! ```text
//! G_i = r_i + r_{i+1} + ... + r_terminal
//! Q(s_i, a_i) ← Q(s_i, a_i) + α (G_i − Q(s_i, a_i))
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use ttt_sarsa::q_learning::{SarsaLearner, SelfPlayTrainer, TrainingConfig};
//!
//! let config = TrainingConfig::new(50_000)
//!     .with_epsilon(0.4)
//!     .with_learning_rate(0.1);
//! let mut trainer = SelfPlayTrainer::new(config)?;
//! trainer.train()?;
//!
//! let learner = SarsaLearner::new(trainer.into_q_table(), "SARSA".to_string());
//! # Ok::<(), ttt_sarsa::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod policy;
pub mod q_table;
pub mod trainer;

// Public re-exports
pub use agent::SarsaLearner;
pub use config::{RewardScheme, TrainingConfig};
pub use policy::{Choice, Decision, EpsilonGreedy};
pub use q_table::QTable;
pub use trainer::{Episode, SelfPlayTrainer, Trajectory, TrainingReport, backward_pass};

//! Match play and observation around the learning core
//!
//! This module provides:
//! - Baseline learners to play against
//! - An evaluation pipeline pitting two learners against each other
//! - Observers reporting progress during training or evaluation

pub mod baselines;
pub mod evaluation;
pub mod observers;

pub use baselines::RandomLearner;
pub use evaluation::{EvaluationConfig, EvaluationPipeline, EvaluationResult, play_game};
pub use observers::ProgressObserver;

pub use crate::ports::{Learner, Observer};

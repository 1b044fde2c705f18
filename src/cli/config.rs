//! Loading and overriding training configuration for CLI commands

use std::{fs, path::Path};

use crate::{Error, Result, q_learning::TrainingConfig};

/// Values given explicitly on the command line; they win over the file
#[derive(Debug, Clone, Default)]
pub struct TrainingOverrides {
    pub games: Option<usize>,
    pub epsilon: Option<f64>,
    pub learning_rate: Option<f64>,
    pub seed: Option<u64>,
}

impl TrainingOverrides {
    pub fn apply(&self, mut config: TrainingConfig) -> TrainingConfig {
        if let Some(games) = self.games {
            config.num_games = games;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}

/// Read a JSON training configuration; missing fields take their defaults
pub fn load_training_config(path: &Path) -> Result<TrainingConfig> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read config {}", path.display()),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Resolve the effective configuration from an optional file and overrides.
///
/// The result is validated.
pub fn resolve_training_config(
    path: Option<&Path>,
    overrides: &TrainingOverrides,
) -> Result<TrainingConfig> {
    let base = match path {
        Some(path) => load_training_config(path)?,
        None => TrainingConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate()?;
    Ok(config)
}

//! Configuration types for self-play training.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{GameOutcome, Player, PlayerResult, STEP_REWARD},
};

/// Rewards handed out during and at the end of a self-play game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardScheme {
    /// Immediate reward recorded for every move
    pub step: f64,
    /// Terminal reward for the winner
    pub win: f64,
    /// Terminal reward for the loser
    pub loss: f64,
    /// Terminal reward for both players after a draw
    pub draw: f64,
}

impl RewardScheme {
    /// Terminal reward for `player` given the final outcome
    pub fn terminal(&self, outcome: GameOutcome, player: Player) -> f64 {
        match outcome.result_for(player) {
            PlayerResult::Win => self.win,
            PlayerResult::Loss => self.loss,
            PlayerResult::Draw => self.draw,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("step", self.step),
            ("win", self.win),
            ("loss", self.loss),
            ("draw", self.draw),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid_config(format!(
                    "{name} reward must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for RewardScheme {
    fn default() -> Self {
        Self {
            step: STEP_REWARD,
            win: 1.0,
            loss: -2.0,
            draw: 0.5,
        }
    }
}

/// Configuration of a self-play training run.
///
/// A run is fully determined by this value: two runs with equal configs
/// produce identical value tables.
///
/// # Examples
///
/// ```
/// use ttt_sarsa::q_learning::TrainingConfig;
///
/// let config = TrainingConfig::new(1_000)
///     .with_epsilon(0.2)
///     .with_learning_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play games
    pub num_games: usize,
    /// Exploration rate, in [0, 1)
    pub epsilon: f64,
    /// Step size of the value update, in (0, 1]
    pub learning_rate: f64,
    /// Base seed; game `i` is seeded with `seed + i`
    pub seed: u64,
    pub rewards: RewardScheme,
    /// Log progress every this many games
    pub progress_interval: usize,
}

impl TrainingConfig {
    /// Create a configuration for `num_games` games with default parameters
    pub fn new(num_games: usize) -> Self {
        Self {
            num_games,
            ..Self::default()
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardScheme) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Seed of the game played after `games_played` completed games
    pub fn episode_seed(&self, games_played: usize) -> u64 {
        self.seed.wrapping_add(games_played as u64)
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `epsilon` is outside
    /// `[0, 1)`, `learning_rate` is outside `(0, 1]`, a reward is not finite,
    /// or `progress_interval` is zero.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.epsilon) {
            return Err(Error::invalid_config(format!(
                "epsilon must be in [0, 1), got {}",
                self.epsilon
            )));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::invalid_config(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if self.progress_interval == 0 {
            return Err(Error::invalid_config("progress_interval must be positive"));
        }
        self.rewards.validate()
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 50_000,
            epsilon: 0.4,
            learning_rate: 0.1,
            seed: 0,
            rewards: RewardScheme::default(),
            progress_interval: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrainingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_epsilon_bounds() {
        assert!(TrainingConfig::new(1).with_epsilon(0.0).validate().is_ok());
        for epsilon in [1.0, -0.01, 1.5, f64::NAN] {
            let err = TrainingConfig::new(1)
                .with_epsilon(epsilon)
                .validate()
                .unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration { .. }), "{epsilon}");
        }
    }

    #[test]
    fn test_learning_rate_bounds() {
        assert!(TrainingConfig::new(1).with_learning_rate(1.0).validate().is_ok());
        for rate in [0.0, -0.5, 1.01, f64::NAN] {
            assert!(
                TrainingConfig::new(1)
                    .with_learning_rate(rate)
                    .validate()
                    .is_err(),
                "{rate}"
            );
        }
    }

    #[test]
    fn test_non_finite_reward_is_rejected() {
        let rewards = RewardScheme {
            win: f64::INFINITY,
            ..RewardScheme::default()
        };
        assert!(TrainingConfig::new(1).with_rewards(rewards).validate().is_err());
    }

    #[test]
    fn test_zero_progress_interval_is_rejected() {
        assert!(
            TrainingConfig::new(1)
                .with_progress_interval(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_terminal_rewards() {
        let rewards = RewardScheme::default();
        let x_wins = GameOutcome::Win(Player::X);
        assert_eq!(rewards.terminal(x_wins, Player::X), 1.0);
        assert_eq!(rewards.terminal(x_wins, Player::O), -2.0);
        assert_eq!(rewards.terminal(GameOutcome::Draw, Player::X), 0.5);
        assert_eq!(rewards.terminal(GameOutcome::Draw, Player::O), 0.5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrainingConfig =
            serde_json::from_str(r#"{"num_games": 10, "rewards": {"loss": -1.0}}"#).unwrap();
        assert_eq!(config.num_games, 10);
        assert_eq!(config.epsilon, 0.4);
        assert_eq!(config.rewards.loss, -1.0);
        assert_eq!(config.rewards.win, 1.0);
    }

    #[test]
    fn test_episode_seed_offsets_base_seed() {
        let config = TrainingConfig::new(3).with_seed(100);
        assert_eq!(config.episode_seed(0), 100);
        assert_eq!(config.episode_seed(2), 102);
    }
}

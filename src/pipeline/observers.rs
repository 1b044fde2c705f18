//! Observer implementations for training and evaluation runs

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{GameOutcome, Player},
};

/// Progress observer - shows a progress bar with the running outcome tally
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    draws: usize,
    o_wins: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            draws: 0,
            o_wins: 0,
        }
    }

    fn tally(&self) -> String {
        format!("X:{} D:{} O:{}", self.x_wins, self.draws, self.o_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.x_wins = 0;
        self.draws = 0;
        self.o_wins = 0;
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_observer_tallies_outcomes() {
        let mut observer = ProgressObserver::new();
        observer.on_training_start(3).unwrap();
        observer.on_game_end(0, GameOutcome::Win(Player::X)).unwrap();
        observer.on_game_end(1, GameOutcome::Draw).unwrap();
        observer.on_game_end(2, GameOutcome::Win(Player::O)).unwrap();
        assert_eq!(observer.tally(), "X:1 D:1 O:1");
        observer.on_training_end().unwrap();
        assert!(observer.progress_bar.is_none());
    }
}

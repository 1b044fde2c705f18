//! Observer port - abstraction for watching a sequence of games
//!
//! Both self-play training and match evaluation report through this port,
//! so progress display and tallies stay out of the game loops.

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring a run of games
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once at the beginning
/// 2. `on_game_end(game_num, outcome)` - after each game (and its update)
/// 3. `on_training_end()` - once at the end
///
/// # Examples
///
/// ```no_run
/// use ttt_sarsa::{ports::Observer, tictactoe::GameOutcome};
///
/// struct CountingObserver {
///     game_count: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> ttt_sarsa::Result<()> {
///         self.game_count += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when the run starts.
    ///
    /// # Parameters
    ///
    /// * `total_games` - Total number of games that will be played
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game ends.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the game (0-based)
    /// * `outcome` - Final outcome of the game
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when the run ends.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

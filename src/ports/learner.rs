//! Learner port - abstraction for anything that picks moves
//!
//! Trained value-table policies and baselines (random play) share this
//! interface so match play can pit them against each other.

use rand::rngs::StdRng;

use crate::{Result, tictactoe::GameState};

/// Unified interface for move-selecting agents
///
/// # Randomness
///
/// Learners do not own a random source. The caller passes the generator of
/// the current episode (see [`TicTacToeEnv::rng_mut`]), so a whole match is
/// reproducible from the seeds given to `reset`.
///
/// [`TicTacToeEnv::rng_mut`]: crate::tictactoe::TicTacToeEnv::rng_mut
///
/// # Examples
///
/// ```no_run
/// use rand::rngs::StdRng;
/// use ttt_sarsa::{ports::Learner, tictactoe::GameState};
///
/// struct FirstEmpty;
///
/// impl Learner for FirstEmpty {
///     fn select_move(&mut self, state: &GameState, _rng: &mut StdRng) -> ttt_sarsa::Result<usize> {
///         state.legal_actions().first().copied().ok_or(ttt_sarsa::Error::GameOver)
///     }
///
///     fn name(&self) -> &str {
///         "first-empty"
///     }
/// }
/// ```
pub trait Learner: Send {
    /// Select a move for the player to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if no legal moves are available (terminal state).
    fn select_move(&mut self, state: &GameState, rng: &mut StdRng) -> Result<usize>;

    /// Get the learner's name.
    ///
    /// Used for identification in evaluation output and logging.
    fn name(&self) -> &str;

    /// Estimated value of each legal move, if the learner keeps one.
    ///
    /// Must not change the learner's state. Moves the learner has never
    /// evaluated are omitted.
    ///
    /// # Default Implementation
    ///
    /// Returns `None`, indicating no value estimates are available.
    fn move_values(&self, _state: &GameState) -> Option<Vec<(usize, f64)>> {
        None
    }
}

//! Baseline learners that need no training

use rand::{Rng, rngs::StdRng};

use crate::{Error, Result, ports::Learner, tictactoe::GameState};

/// Random learner - picks uniformly among the empty cells
pub struct RandomLearner {
    name: String,
}

impl RandomLearner {
    /// Create a new random learner
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl Learner for RandomLearner {
    fn select_move(&mut self, state: &GameState, rng: &mut StdRng) -> Result<usize> {
        let moves = state.legal_actions();
        if state.is_terminal() || moves.is_empty() {
            return Err(Error::EmptyLegalActions {
                state: state.key().to_string(),
            });
        }
        let index = rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }
}

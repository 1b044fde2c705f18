//! Epsilon-greedy action selection over a [`QTable`]

use rand::{Rng, seq::IndexedRandom};
use tracing::trace;

use super::q_table::QTable;
use crate::{Error, Result, tictactoe::GameState};

/// Which branch of the epsilon-greedy rule produced an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Uniform draw among legal actions
    Explore,
    /// Maximal table value among legal actions
    Exploit,
}

/// An action together with the branch that picked it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub action: usize,
    pub decision: Decision,
}

/// Epsilon-greedy policy with a fixed exploration rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// Create a policy exploring with probability `epsilon`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `0 <= epsilon < 1`.
    pub fn new(epsilon: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&epsilon) {
            return Err(Error::invalid_config(format!(
                "epsilon must be in [0, 1), got {epsilon}"
            )));
        }
        Ok(Self { epsilon })
    }

    /// Fully greedy policy; never consults the random source
    pub fn greedy() -> Self {
        Self { epsilon: 0.0 }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Select an action for the player to move in `state`.
    ///
    /// See [`EpsilonGreedy::choose`] for the table side effects.
    pub fn select_action<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        table: &mut QTable,
        rng: &mut R,
    ) -> Result<usize> {
        self.choose(state, table, rng).map(|choice| choice.action)
    }

    /// Select an action and report which branch picked it.
    ///
    /// With `epsilon > 0` one uniform draw decides the branch. Exploring
    /// initializes only the chosen pair; exploiting initializes every legal
    /// pair of the state before taking the first maximal one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLegalActions`] if `state` is terminal.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        table: &mut QTable,
        rng: &mut R,
    ) -> Result<Choice> {
        let key = state.key();
        let legal_actions = state.legal_actions();
        if state.is_terminal() || legal_actions.is_empty() {
            return Err(Error::EmptyLegalActions {
                state: key.to_string(),
            });
        }

        let choice = if self.epsilon > 0.0 && rng.random::<f64>() < self.epsilon {
            let action = *legal_actions
                .choose(rng)
                .ok_or_else(|| Error::EmptyLegalActions {
                    state: key.to_string(),
                })?;
            table.get(key, action);
            Choice {
                action,
                decision: Decision::Explore,
            }
        } else {
            for &action in &legal_actions {
                table.get(key, action);
            }
            Choice {
                action: table.best_action(key, &legal_actions)?,
                decision: Decision::Exploit,
            }
        };

        trace!(state = %key, action = choice.action, decision = ?choice.decision, "selected action");
        Ok(choice)
    }
}

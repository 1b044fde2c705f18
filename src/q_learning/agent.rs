//! Move selection backed by a learned value table

use rand::rngs::StdRng;

use super::{policy::EpsilonGreedy, q_table::QTable};
use crate::{Result, ports::Learner, tictactoe::GameState};

/// Plays from a trained [`QTable`] with an epsilon-greedy rule.
///
/// Created greedy (`epsilon = 0`) for evaluation and interactive play.
/// Selecting a move lazily initializes the table entries it reads, exactly as
/// during training.
#[derive(Debug, Clone)]
pub struct SarsaLearner {
    q_table: QTable,
    policy: EpsilonGreedy,
    name: String,
}

impl SarsaLearner {
    /// Create a greedy learner from a trained table
    pub fn new(q_table: QTable, name: String) -> Self {
        Self {
            q_table,
            policy: EpsilonGreedy::greedy(),
            name,
        }
    }

    /// Replace the selection policy (e.g. to keep exploring)
    pub fn with_policy(mut self, policy: EpsilonGreedy) -> Self {
        self.policy = policy;
        self
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn policy(&self) -> EpsilonGreedy {
        self.policy
    }
}

impl Learner for SarsaLearner {
    fn select_move(&mut self, state: &GameState, rng: &mut StdRng) -> Result<usize> {
        self.policy.select_action(state, &mut self.q_table, rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn move_values(&self, state: &GameState) -> Option<Vec<(usize, f64)>> {
        let key = state.key();
        let values: Vec<(usize, f64)> = self
            .q_table
            .action_values(&key, &state.legal_actions())
            .into_iter()
            .filter_map(|(action, value)| value.map(|v| (action, v)))
            .collect();
        (!values.is_empty()).then_some(values)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_greedy_learner_follows_table() {
        let state = GameState::from_string("XO.......").unwrap();
        let mut table = QTable::new();
        table.set(state.key(), 8, 0.9);
        table.set(state.key(), 2, 0.1);

        let mut learner = SarsaLearner::new(table, "SARSA".to_string());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(learner.select_move(&state, &mut rng).unwrap(), 8);
        assert_eq!(learner.policy().epsilon(), 0.0);
    }

    #[test]
    fn test_move_values_skip_unknown_moves() {
        let state = GameState::new();
        let mut table = QTable::new();
        table.set(state.key(), 4, 0.25);
        let learner = SarsaLearner::new(table, "SARSA".to_string());

        assert_eq!(learner.move_values(&state), Some(vec![(4, 0.25)]));
        let unseen = state.transition(4).unwrap();
        assert_eq!(learner.move_values(&unseen), None);
        assert_eq!(learner.q_table().size(), 1);
    }
}

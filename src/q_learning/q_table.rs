//! Sparse state-action value table

use std::collections::HashMap;

use crate::{Error, Result, tictactoe::StateKey};

/// Value table mapping (state key, action) pairs to estimates.
///
/// Entries are created on first read with value `0.0` and are never removed
/// except by [`QTable::reset`]. Reads through [`QTable::get`] and
/// [`QTable::best_action`] therefore grow the table; use [`QTable::peek`] to
/// inspect without inserting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    q_values: HashMap<(StateKey, usize), f64>,
}

impl QTable {
    /// Value assigned to a pair on first reference
    pub const INITIAL_VALUE: f64 = 0.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a pair, inserting the initial value if absent
    pub fn get(&mut self, state: StateKey, action: usize) -> f64 {
        *self
            .q_values
            .entry((state, action))
            .or_insert(Self::INITIAL_VALUE)
    }

    /// Get the value of a pair without creating it
    pub fn peek(&self, state: &StateKey, action: usize) -> Option<f64> {
        self.q_values.get(&(*state, action)).copied()
    }

    pub fn contains(&self, state: &StateKey, action: usize) -> bool {
        self.q_values.contains_key(&(*state, action))
    }

    /// Set the value of a pair, inserting it if needed
    pub fn set(&mut self, state: StateKey, action: usize, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Greedy action among `legal_actions`.
    ///
    /// Every listed action is initialized first. Ties go to the first maximal
    /// action in the order given, not to the lowest index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLegalActions`] if `legal_actions` is empty.
    pub fn best_action(&mut self, state: StateKey, legal_actions: &[usize]) -> Result<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &action in legal_actions {
            let value = self.get(state, action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
            .ok_or_else(|| Error::EmptyLegalActions {
                state: state.to_string(),
            })
    }

    /// Move a pair's value toward `target`:
    ///
    /// Q(s,a) ← Q(s,a) + α (target − Q(s,a))
    ///
    /// Returns the updated value.
    pub fn update_toward(
        &mut self,
        state: StateKey,
        action: usize,
        target: f64,
        learning_rate: f64,
    ) -> f64 {
        let value = self
            .q_values
            .entry((state, action))
            .or_insert(Self::INITIAL_VALUE);
        *value += learning_rate * (target - *value);
        *value
    }

    /// Known values of `actions` in `state`, without inserting missing ones
    pub fn action_values(&self, state: &StateKey, actions: &[usize]) -> Vec<(usize, Option<f64>)> {
        actions
            .iter()
            .map(|&action| (action, self.peek(state, action)))
            .collect()
    }

    /// Number of distinct states with at least one entry
    pub fn state_count(&self) -> usize {
        let mut states: Vec<&StateKey> = self.q_values.keys().map(|(s, _)| s).collect();
        states.sort_unstable();
        states.dedup();
        states.len()
    }

    /// Remove every entry
    pub fn reset(&mut self) {
        self.q_values.clear();
    }

    /// Get total number of values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(StateKey, usize), &f64)> {
        self.q_values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::GameState;

    fn empty_key() -> StateKey {
        GameState::new().key()
    }

    #[test]
    fn test_get_initializes_lazily() {
        let mut qtable = QTable::new();
        let state = empty_key();
        assert!(!qtable.contains(&state, 0));
        assert_eq!(qtable.get(state, 0), 0.0);
        assert!(qtable.contains(&state, 0));
        assert_eq!(qtable.size(), 1);
    }

    #[test]
    fn test_peek_does_not_insert() {
        let qtable = QTable::new();
        assert_eq!(qtable.peek(&empty_key(), 4), None);
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        let state = empty_key();
        qtable.set(state, 4, 1.5);
        assert_eq!(qtable.get(state, 4), 1.5);
        qtable.set(state, 4, -0.25);
        assert_eq!(qtable.peek(&state, 4), Some(-0.25));
    }

    #[test]
    fn test_best_action() {
        let mut qtable = QTable::new();
        let state = empty_key();
        qtable.set(state, 0, 0.5);
        qtable.set(state, 1, 1.5);
        qtable.set(state, 2, 0.8);

        assert_eq!(qtable.best_action(state, &[0, 1, 2]).unwrap(), 1);
    }

    #[test]
    fn test_best_action_initializes_all_and_breaks_ties_by_order() {
        let mut qtable = QTable::new();
        let state = empty_key();

        assert_eq!(qtable.best_action(state, &[5, 2, 7]).unwrap(), 5);
        for action in [5, 2, 7] {
            assert_eq!(qtable.peek(&state, action), Some(0.0));
        }
        assert_eq!(qtable.size(), 3);

        qtable.set(state, 7, 0.3);
        qtable.set(state, 2, 0.3);
        assert_eq!(qtable.best_action(state, &[5, 7, 2]).unwrap(), 7);
        assert_eq!(qtable.best_action(state, &[5, 2, 7]).unwrap(), 2);
    }

    #[test]
    fn test_best_action_prefers_zero_over_negative() {
        let mut qtable = QTable::new();
        let state = empty_key();
        qtable.set(state, 0, -0.2);
        qtable.set(state, 1, -0.1);

        assert_eq!(qtable.best_action(state, &[0, 1, 2]).unwrap(), 2);
    }

    #[test]
    fn test_best_action_rejects_empty_list() {
        let mut qtable = QTable::new();
        let err = qtable.best_action(empty_key(), &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyLegalActions { .. }));
    }

    #[test]
    fn test_update_toward() {
        let mut qtable = QTable::new();
        let state = empty_key();

        let updated = qtable.update_toward(state, 4, 1.0, 0.5);
        assert!((updated - 0.5).abs() < 1e-12);

        let updated = qtable.update_toward(state, 4, 1.0, 0.5);
        assert!((updated - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_state_count_and_reset() {
        let mut qtable = QTable::new();
        let a = empty_key();
        let b = GameState::new().transition(4).unwrap().key();
        qtable.get(a, 0);
        qtable.get(a, 1);
        qtable.get(b, 0);
        assert_eq!(qtable.state_count(), 2);
        assert_eq!(qtable.size(), 3);

        qtable.reset();
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_action_values_reports_missing_entries() {
        let mut qtable = QTable::new();
        let state = empty_key();
        qtable.set(state, 1, 0.4);
        assert_eq!(
            qtable.action_values(&state, &[0, 1]),
            vec![(0, None), (1, Some(0.4))]
        );
    }
}

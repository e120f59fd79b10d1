//! Dense state-value storage.
//!
//! One entry per [`StateId`] in the full 3^9 enumeration. An entry is the
//! owning agent's estimated probability of eventually winning from that state.

use rayon::prelude::*;

use crate::tictactoe::codec::{self, Outcome, Player, StateId, NUM_STATES};

/// Value assigned to unfinished and tied states before any learning.
pub const NEUTRAL_VALUE: f64 = 0.5;

/// State-value table for one player.
///
/// Indexed directly by state id. Each agent owns its tables; nothing is
/// shared between agents.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Vec<f64>,
}

impl ValueTable {
    /// Prior table for `player`, seeded from the terminal outcome of every state.
    ///
    /// - Unfinished or tie: 0.5
    /// - Win for `player`: 1.0
    /// - Win for the opponent: 0.0
    pub fn seeded(player: Player) -> Self {
        let values = (0..NUM_STATES)
            .into_par_iter()
            .map(|state| match codec::classify(&codec::unpack(state)) {
                Outcome::Unfinished | Outcome::Tie => NEUTRAL_VALUE,
                Outcome::Win(winner) if winner == player => 1.0,
                Outcome::Win(_) => 0.0,
            })
            .collect();

        Self { values }
    }

    /// Table with every entry set to `value`.
    pub fn uniform(value: f64) -> Self {
        Self {
            values: vec![value; NUM_STATES],
        }
    }

    /// Value of a state.
    ///
    /// # Panics
    /// Panics if `state >= NUM_STATES`.
    pub fn get(&self, state: StateId) -> f64 {
        self.values[state]
    }

    /// Overwrite the value of `state`.
    ///
    /// # Panics
    /// Panics if `state >= NUM_STATES`.
    pub fn set(&mut self, state: StateId, value: f64) {
        self.values[state] = value;
    }

    /// Move `values[state]` a fraction `alpha` of the way toward `target`.
    ///
    /// With both endpoints in `[0, 1]` and `alpha` in `(0, 1]` the result
    /// stays in `[0, 1]`.
    pub fn step_toward(&mut self, state: StateId, target: f64, alpha: f64) {
        let current = self.values[state];
        self.values[state] = current + alpha * (target - current);
    }

    /// Number of entries, always `NUM_STATES`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true for a seeded or uniform table.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values indexed by state id.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Overwrite every entry with the corresponding entry of `other`.
    pub fn copy_from(&mut self, other: &ValueTable) {
        self.values.copy_from_slice(&other.values);
    }

    /// Mean absolute difference to another table.
    ///
    /// Used as a convergence indicator between progress reports: large early
    /// in training, approaching zero as the estimates settle.
    pub fn mean_abs_difference(&self, other: &ValueTable) -> f64 {
        let total: f64 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| (a - b).abs())
            .sum();
        total / self.values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::codec::{encode, Board, Cell};

    fn row_win(cell: Cell) -> Board {
        let mut board = Board::empty();
        for col in 0..3 {
            board.set(0, col, cell);
        }
        board
    }

    #[test]
    fn test_seeded_priors() {
        let table = ValueTable::seeded(Player::A);
        assert_eq!(table.len(), NUM_STATES);

        assert_eq!(table.get(encode(&row_win(Cell::A))), 1.0);
        assert_eq!(table.get(encode(&row_win(Cell::B))), 0.0);
        assert_eq!(table.get(encode(&Board::empty())), 0.5);

        let table = ValueTable::seeded(Player::B);
        assert_eq!(table.get(encode(&row_win(Cell::A))), 0.0);
        assert_eq!(table.get(encode(&row_win(Cell::B))), 1.0);
    }

    #[test]
    fn test_seeded_values_are_priors_only() {
        let table = ValueTable::seeded(Player::A);
        assert!(table
            .as_slice()
            .iter()
            .all(|&v| v == 0.0 || v == 0.5 || v == 1.0));
    }

    #[test]
    fn test_step_toward() {
        let mut table = ValueTable::uniform(0.5);
        table.step_toward(7, 1.0, 0.5);
        assert_eq!(table.get(7), 0.75);

        table.step_toward(7, 0.0, 1.0);
        assert_eq!(table.get(7), 0.0);
    }

    #[test]
    fn test_mean_abs_difference() {
        let a = ValueTable::uniform(0.5);
        let mut b = a.clone();
        assert_eq!(a.mean_abs_difference(&b), 0.0);

        b.set(0, 1.5);
        let expected = 1.0 / NUM_STATES as f64;
        assert!((a.mean_abs_difference(&b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_copy_from() {
        let prior = ValueTable::seeded(Player::A);
        let mut live = ValueTable::uniform(0.0);
        live.copy_from(&prior);
        assert_eq!(live, prior);
    }
}

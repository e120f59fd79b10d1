//! Enumeration of the states legal play can actually reach.

use rustc_hash::FxHashSet;

use crate::tictactoe::codec::{self, Cell, Player, StateId, NUM_CELLS};

/// Every state reachable from the empty board by alternating legal moves
/// (A first), stopping at terminal outcomes. Includes the empty board.
pub fn reachable_states() -> FxHashSet<StateId> {
    let mut seen = FxHashSet::default();
    let mut stack = vec![(0, Player::A)];

    while let Some((state, to_move)) = stack.pop() {
        if !seen.insert(state) {
            continue;
        }

        let board = codec::unpack(state);
        if codec::classify(&board).is_terminal() {
            continue;
        }

        for action in (0..NUM_CELLS).filter(|&a| board.cell(a) == Cell::Empty) {
            stack.push((codec::place(state, action, to_move), to_move.opponent()));
        }
    }

    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::codec::{Outcome, NUM_STATES};

    #[test]
    fn test_reachable_state_count() {
        let states = reachable_states();
        assert_eq!(states.len(), 5478);
        assert!(states.contains(&0));
        assert!(states.iter().all(|&s| s < NUM_STATES));
    }

    #[test]
    fn test_reachable_states_have_legal_piece_counts() {
        for state in reachable_states() {
            let board = codec::unpack(state);
            let a = (0..NUM_CELLS).filter(|&i| board.cell(i) == Cell::A).count();
            let b = (0..NUM_CELLS).filter(|&i| board.cell(i) == Cell::B).count();
            assert!(a == b || a == b + 1, "state {} has {} A and {} B", state, a, b);
        }
    }

    #[test]
    fn test_reachable_terminal_counts() {
        let mut ties = 0;
        let mut a_wins = 0;
        let mut b_wins = 0;
        for state in reachable_states() {
            match codec::classify_state(state).unwrap() {
                Outcome::Tie => ties += 1,
                Outcome::Win(Player::A) => a_wins += 1,
                Outcome::Win(Player::B) => b_wins += 1,
                Outcome::Unfinished => {}
            }
        }
        assert_eq!(ties, 16);
        assert_eq!(a_wins, 626);
        assert_eq!(b_wins, 316);
    }
}

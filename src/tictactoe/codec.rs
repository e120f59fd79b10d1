//! State codec: boards <-> dense state ids.
//!
//! Every 3×3 assignment of {Empty, A, B} maps to a unique integer in
//! `[0, 3^9)` by base-3 positional encoding. Cell `(row, col)` is the digit
//! with weight `3^(3 * row + col)`, which is `3^action` for the action index
//! `row * 3 + col`. Both directions and the successor arithmetic in `place`
//! rely on this one convention.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Side length of the board.
pub const SIZE: usize = 3;

/// Number of cells (and of action indices).
pub const NUM_CELLS: usize = SIZE * SIZE;

/// Size of the full enumeration, 3^9.
pub const NUM_STATES: usize = 19_683;

/// Dense identifier of one full board configuration.
pub type StateId = usize;

/// Positional weight of each action index.
const WEIGHTS: [StateId; NUM_CELLS] = [1, 3, 9, 27, 81, 243, 729, 2187, 6561];

/// The eight winning lines as action indices: rows, columns, then both diagonals.
const LINES: [[usize; SIZE]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Contents of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Marked by player A.
    A,
    /// Marked by player B.
    B,
}

impl Cell {
    /// Base-3 digit of this cell.
    pub fn digit(self) -> StateId {
        match self {
            Cell::Empty => 0,
            Cell::A => 1,
            Cell::B => 2,
        }
    }

    fn from_digit(digit: StateId) -> Cell {
        match digit % 3 {
            0 => Cell::Empty,
            1 => Cell::A,
            _ => Cell::B,
        }
    }

    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::A => Some(Player::A),
            Cell::B => Some(Player::B),
        }
    }

    /// Display glyph: `.` for empty, `X` for A, `O` for B.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::A => 'X',
            Cell::B => 'O',
        }
    }
}

/// One of the two players. A always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// First mover, shown as `X`.
    A,
    /// Second mover, shown as `O`.
    B,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// The mark this player places.
    pub fn cell(self) -> Cell {
        match self {
            Player::A => Cell::A,
            Player::B => Cell::B,
        }
    }

    /// Turn slot: 0 for A, 1 for B.
    pub fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// Result of classifying a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No completed line and at least one empty cell.
    Unfinished,
    /// Full board with no completed line.
    Tie,
    /// The player completed a line.
    Win(Player),
}

impl Outcome {
    /// `true` for a tie or a win.
    pub fn is_terminal(self) -> bool {
        self != Outcome::Unfinished
    }

    /// The winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unfinished => write!(f, "unfinished"),
            Outcome::Tie => write!(f, "tie"),
            Outcome::Win(player) => write!(f, "{} wins", player),
        }
    }
}

/// A 3×3 grid of cells, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// The all-empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a board from its rows, top to bottom.
    pub fn from_rows(cells: [[Cell; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// Cell at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below 3.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Overwrite the cell at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below 3.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Cell addressed by action index `row * 3 + col`.
    ///
    /// # Panics
    /// Panics if `action >= 9`.
    pub fn cell(&self, action: usize) -> Cell {
        self.cells[action / SIZE][action % SIZE]
    }

    /// `true` when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != Cell::Empty)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(f, " {} | {} | {}", row[0].to_char(), row[1].to_char(), row[2].to_char())?;
        }
        Ok(())
    }
}

/// Fold the nine cells into a state id. Exact inverse of [`decode`].
pub fn encode(board: &Board) -> StateId {
    (0..NUM_CELLS)
        .rev()
        .fold(0, |state, action| state * 3 + board.cell(action).digit())
}

/// Unfold a state id into a board.
///
/// # Errors
/// Returns [`Error::StateOutOfRange`] if `state >= 3^9`.
pub fn decode(state: StateId) -> Result<Board> {
    if state >= NUM_STATES {
        return Err(Error::StateOutOfRange(state));
    }
    Ok(unpack(state))
}

/// Decode without the range check. Callers guarantee `state < NUM_STATES`.
pub(crate) fn unpack(mut state: StateId) -> Board {
    debug_assert!(state < NUM_STATES);
    let mut board = Board::empty();
    for action in 0..NUM_CELLS {
        board.set(action / SIZE, action % SIZE, Cell::from_digit(state % 3));
        state /= 3;
    }
    board
}

/// Terminal outcome of any grid, reachable or not.
///
/// Lines are scanned rows first, then columns, then the two diagonals; the
/// first completed line decides the winner.
pub fn classify(board: &Board) -> Outcome {
    for line in LINES.iter() {
        let first = board.cell(line[0]);
        if let Some(player) = first.owner() {
            if line[1..].iter().all(|&a| board.cell(a) == first) {
                return Outcome::Win(player);
            }
        }
    }

    if board.is_full() {
        Outcome::Tie
    } else {
        Outcome::Unfinished
    }
}

/// Classify the board behind a state id.
pub fn classify_state(state: StateId) -> Result<Outcome> {
    decode(state).map(|board| classify(&board))
}

/// Successor of `state` after `player` marks the empty cell `action`.
///
/// Pure state arithmetic, equal to encoding the decoded board with the mark
/// applied. Callers guarantee the cell is empty and `action < 9`.
pub(crate) fn place(state: StateId, action: usize, player: Player) -> StateId {
    debug_assert_eq!(unpack(state).cell(action), Cell::Empty);
    state + player.cell().digit() * WEIGHTS[action]
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::Cell::{Empty as E, A, B};

    #[test]
    fn test_round_trip_all_states() {
        for state in 0..NUM_STATES {
            let board = decode(state).unwrap();
            assert_eq!(encode(&board), state);
        }
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert!(matches!(decode(NUM_STATES), Err(Error::StateOutOfRange(19_683))));
        assert!(matches!(classify_state(usize::MAX), Err(Error::StateOutOfRange(_))));
    }

    #[test]
    fn test_empty_board_is_state_zero() {
        let board = decode(0).unwrap();
        assert_eq!(board, Board::empty());
        assert_eq!(classify(&board), Outcome::Unfinished);
    }

    #[test]
    fn test_digit_weights_are_row_major() {
        // A in the top-right corner (action 2) is 1 * 3^2.
        let mut board = Board::empty();
        board.set(0, 2, A);
        assert_eq!(encode(&board), 9);

        // B in the bottom-left corner (action 6) is 2 * 3^6.
        let mut board = Board::empty();
        board.set(2, 0, B);
        assert_eq!(encode(&board), 1458);
    }

    #[test]
    fn test_classify_row_win() {
        let board = Board::from_rows([[A, A, A], [E, E, E], [E, E, E]]);
        assert_eq!(classify(&board), Outcome::Win(Player::A));
    }

    #[test]
    fn test_classify_column_and_diagonals() {
        let column = Board::from_rows([[E, B, A], [E, B, A], [E, B, E]]);
        assert_eq!(classify(&column), Outcome::Win(Player::B));

        let diagonal = Board::from_rows([[A, B, E], [B, A, E], [E, E, A]]);
        assert_eq!(classify(&diagonal), Outcome::Win(Player::A));

        let anti = Board::from_rows([[A, A, B], [E, B, E], [B, A, E]]);
        assert_eq!(classify(&anti), Outcome::Win(Player::B));
    }

    #[test]
    fn test_classify_full_board_tie() {
        let board = Board::from_rows([[A, B, A], [A, B, B], [B, A, A]]);
        assert_eq!(classify(&board), Outcome::Tie);
    }

    #[test]
    fn test_classify_win_on_full_board_is_not_tie() {
        let board = Board::from_rows([[A, A, A], [B, B, A], [A, B, B]]);
        assert_eq!(classify(&board), Outcome::Win(Player::A));
    }

    #[test]
    fn test_classify_impossible_board_follows_scan_order() {
        // Two completed rows of different players: the first row scanned wins.
        let board = Board::from_rows([[B, B, B], [A, A, A], [E, E, E]]);
        assert_eq!(classify(&board), Outcome::Win(Player::B));

        // Same for columns, left to right.
        let board = Board::from_rows([[A, B, E], [A, B, E], [A, B, E]]);
        assert_eq!(classify(&board), Outcome::Win(Player::A));
    }

    #[test]
    fn test_classify_is_total() {
        let mut counts = [0usize; 4];
        for state in 0..NUM_STATES {
            let slot = match classify_state(state).unwrap() {
                Outcome::Unfinished => 0,
                Outcome::Tie => 1,
                Outcome::Win(Player::A) => 2,
                Outcome::Win(Player::B) => 3,
            };
            counts[slot] += 1;
        }
        assert_eq!(counts.iter().sum::<usize>(), NUM_STATES);
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn test_place_matches_decode_mutate_encode() {
        for state in 0..NUM_STATES {
            let board = unpack(state);
            for action in (0..NUM_CELLS).filter(|&a| board.cell(a) == E) {
                for player in [Player::A, Player::B] {
                    let mut next = board;
                    next.set(action / SIZE, action % SIZE, player.cell());
                    assert_eq!(place(state, action, player), encode(&next));
                }
            }
        }
    }

    #[test]
    fn test_board_display() {
        let board = Board::from_rows([[A, E, E], [E, B, E], [E, E, A]]);
        let text = board.to_string();
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with(" X | . | ."));
        assert!(text.contains(" . | O | ."));
    }
}

//! The live game: board, active player, outcome and the episode trail.

use crate::error::{Error, Result};
use crate::tictactoe::codec::{self, Board, Cell, Outcome, Player, StateId, NUM_CELLS, SIZE};

/// Environment for one episode at a time.
///
/// Created in the reset state. Only [`GameState::apply`] mutates it between
/// resets; once the outcome is terminal further moves are rejected until
/// [`GameState::reset`] is called.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    state: StateId,
    active: Player,
    outcome: Outcome,
    /// State ids visited this episode, starting with the empty board.
    trail: Vec<StateId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Empty board with A to move.
    pub fn new() -> Self {
        let board = Board::empty();
        let state = codec::encode(&board);
        let mut trail = Vec::with_capacity(NUM_CELLS + 1);
        trail.push(state);

        Self {
            board,
            state,
            active: Player::A,
            outcome: Outcome::Unfinished,
            trail,
        }
    }

    /// Clear the board and start a new episode with A to move.
    pub fn reset(&mut self) {
        self.board = Board::empty();
        self.state = codec::encode(&self.board);
        self.active = Player::A;
        self.outcome = Outcome::Unfinished;
        self.trail.clear();
        self.trail.push(self.state);
    }

    /// Empty cells as action indices (`row * 3 + col`), in row-major order.
    pub fn valid_actions(&self) -> Vec<usize> {
        let actions: Vec<usize> = (0..NUM_CELLS)
            .filter(|&action| self.board.cell(action) == Cell::Empty)
            .collect();
        debug_assert!(
            !actions.is_empty() || self.outcome.is_terminal(),
            "full board must already be classified"
        );
        actions
    }

    /// Place the active player's mark on `action`.
    ///
    /// Records the new state on the trail, flips the active player and returns
    /// the new outcome.
    ///
    /// # Errors
    /// - [`Error::GameOver`] if the episode already ended.
    /// - [`Error::InvalidAction`] if `action` is out of range or occupied.
    pub fn apply(&mut self, action: usize) -> Result<Outcome> {
        if self.outcome.is_terminal() {
            return Err(Error::GameOver);
        }
        if action >= NUM_CELLS {
            return Err(Error::InvalidAction {
                action,
                reason: "out of range (must be 0-8)",
            });
        }
        if self.board.cell(action) != Cell::Empty {
            return Err(Error::InvalidAction {
                action,
                reason: "cell already occupied",
            });
        }

        let previous = self.state;
        self.board.set(action / SIZE, action % SIZE, self.active.cell());
        self.state = codec::encode(&self.board);
        debug_assert_eq!(self.state, codec::place(previous, action, self.active));

        self.outcome = codec::classify(&self.board);
        self.trail.push(self.state);
        self.active = self.active.opponent();

        Ok(self.outcome)
    }

    /// Id of the current board.
    pub fn current_state(&self) -> StateId {
        self.state
    }

    /// States visited this episode, oldest first.
    pub fn trail(&self) -> &[StateId] {
        &self.trail
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose turn it is.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Classification of the current board.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Half-moves played so far this episode.
    pub fn moves_played(&self) -> usize {
        self.trail.len() - 1
    }
}

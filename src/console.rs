//! Console collaborators: board rendering and human keyboard input.
//!
//! Human moves use a fixed key layout mirroring the board:
//!
//! ```text
//!  q | w | e
//!  a | s | d
//!  z | x | c
//! ```

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::td::Competitor;
use crate::tictactoe::{Board, GameState, Outcome, Player, NUM_CELLS};

/// Key for each action index, row-major.
pub const KEYS: [char; NUM_CELLS] = ['q', 'w', 'e', 'a', 's', 'd', 'z', 'x', 'c'];

/// Text rendering of a board.
pub fn render(board: &Board) -> String {
    board.to_string()
}

/// Action index for a key, if the key is on the layout.
pub fn key_to_action(key: char) -> Option<usize> {
    let key = key.to_ascii_lowercase();
    KEYS.iter().position(|&k| k == key)
}

/// Message for the human playing `human` once the game ends.
pub fn verdict(outcome: Outcome, human: Player) -> &'static str {
    match outcome.winner() {
        Some(winner) if winner == human => "You win!",
        Some(_) => "You lose :<",
        None => "It is a tie",
    }
}

/// Human competitor reading moves from `input` and prompting on `output`.
pub struct HumanPlayer<R, W> {
    player: Player,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Human playing `player`, reading lines from `input`.
    pub fn new(player: Player, input: R, output: W) -> Self {
        Self {
            player,
            input,
            output,
        }
    }

    /// Prompt until a legal action is entered.
    ///
    /// Unknown keys and occupied cells re-prompt.
    ///
    /// # Errors
    /// Returns [`Error::InputClosed`] if the input ends first.
    pub fn read_action(&mut self, valid_actions: &[usize]) -> Result<usize> {
        let mut line = String::new();
        loop {
            write!(
                self.output,
                "Input your position using q, w, e, a, s, d, z, x, c and a return: "
            )?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }

            let mut chars = line.trim().chars();
            let action = match (chars.next(), chars.next()) {
                (Some(key), None) => key_to_action(key),
                _ => None,
            };

            match action {
                Some(action) if valid_actions.contains(&action) => return Ok(action),
                Some(_) => writeln!(self.output, "That cell is taken.")?,
                None => writeln!(self.output, "Unknown key {:?}.", line.trim())?,
            }
        }
    }

    /// Consume the player and return its input and output.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Competitor for HumanPlayer<R, W> {
    fn player(&self) -> Player {
        self.player
    }

    fn take_turn(&mut self, env: &mut GameState) -> Result<Outcome> {
        let action = self.read_action(&env.valid_actions())?;
        env.apply(action)
    }

    fn game_over(&mut self, outcome: Outcome) -> Result<()> {
        writeln!(self.output, "{}", verdict(outcome, self.player))?;
        Ok(())
    }
}

//! Error types shared across the crate.

use thiserror::Error;

use crate::td::config::ConfigError;
use crate::tictactoe::StateId;

/// Errors raised by the environment, the agents and the console collaborators.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The action is outside `[0, 9)` or targets an occupied cell.
    #[error("invalid action {action}: {reason}")]
    InvalidAction {
        /// The rejected action index.
        action: usize,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// An agent was asked to move with no legal action available.
    #[error("no legal move available")]
    NoLegalMove,

    /// A state id outside `[0, 3^9)`.
    #[error("state id {0} is out of range (must be below 19683)")]
    StateOutOfRange(StateId),

    /// A move was attempted after the episode reached a terminal outcome.
    #[error("game already over")]
    GameOver,

    /// The human input stream ended before a legal action was read.
    #[error("input closed before a legal action was entered")]
    InputClosed,

    /// Reading human input or writing prompts failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The training configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

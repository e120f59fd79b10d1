//! Fixed 3×3 tic-tac-toe: state codec, live environment, and the reachable
//! portion of the state space.
//!
//! The codec is the load-bearing piece. Value tables are dense arrays indexed
//! by [`StateId`], so encoding, decoding and the successor arithmetic used by
//! the agents must all agree on the same digit order.

pub mod codec;
pub mod environment;
pub mod reachable;

pub use codec::{
    classify, classify_state, decode, encode, Board, Cell, Outcome, Player, StateId,
    NUM_CELLS, NUM_STATES, SIZE,
};
pub use environment::GameState;
pub use reachable::reachable_states;

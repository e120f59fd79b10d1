//! # ttt-td
//!
//! A minimal reinforcement-learning testbed: two agents learn tic-tac-toe by
//! tabular temporal-difference value learning over the complete enumerated
//! state space, then play each other or a human.
//!
//! ## Features
//!
//! - **Dense State Codec**: Every 3×3 board maps to an id in `[0, 3^9)`
//! - **TD(0) Backups**: Backward credit assignment over each episode's trail
//! - **Epsilon-Greedy Play**: Exploration during training, random tie-breaking
//! - **Parallel Trials**: Independent train-and-play runs across threads
//!
//! ## Quick Start
//!
//! ```no_run
//! use ttt_td::{TrainingConfig, Umpire};
//!
//! let mut umpire = Umpire::new(TrainingConfig::default()).unwrap();
//! umpire.train(10_000).unwrap();
//! let outcome = umpire.play().unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`tictactoe`]: State codec and game environment
//! - [`td`]: Value tables, agents and the training loop
//! - [`console`]: Board rendering and human input
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                    Umpire                    │
//! │  - alternates turns    - tallies outcomes    │
//! │  - triggers backups    - demo / human games  │
//! └──────────────────────────────────────────────┘
//!           │                          │
//!           ▼                          ▼
//!   ┌───────────────┐         ┌──────────────────┐
//!   │  ValueAgent   │ ──────▶ │    GameState     │
//!   │  (A and B)    │  apply  │  board + trail   │
//!   └───────────────┘         └──────────────────┘
//!           │                          │
//!           └────────────┬─────────────┘
//!                        ▼
//!                 ┌─────────────┐
//!                 │ StateCodec  │
//!                 └─────────────┘
//! ```

#![warn(missing_docs)]

/// Board console collaborators.
pub mod console;

/// Crate error type.
pub mod error;

/// Temporal-difference learning: tables, agents and the umpire.
pub mod td;

/// Tic-tac-toe state codec and environment.
pub mod tictactoe;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use td::{TrainingConfig, Umpire, ValueAgent};
pub use tictactoe::{Board, Cell, GameState, Outcome, Player, StateId};

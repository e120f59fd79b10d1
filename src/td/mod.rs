//! Tabular temporal-difference value learning.
//!
//! This module provides the learning side of the testbed: a dense value
//! table per agent, the epsilon-greedy [`ValueAgent`], and the [`Umpire`]
//! that runs self-play training and demo games.
//!
//! # Overview
//!
//! Each agent holds `V(s)`, its estimated probability of winning from state
//! `s`, for every one of the 3^9 encodable states. Values start from a prior
//! (1.0 for states won by the agent, 0.0 for states lost, 0.5 otherwise) and
//! are refined after every episode by a backward pass over the visited
//! states:
//!
//! ```text
//! V(s_i) ← V(s_i) + α · (V(s_{i+1}) − V(s_i))
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ttt_td::td::{TrainingConfig, Umpire};
//!
//! let config = TrainingConfig::default().with_epsilon(0.1).with_alpha(0.1);
//! let mut umpire = Umpire::new(config).unwrap();
//!
//! let stats = umpire.train(10_000).unwrap();
//! println!("win times (tie, A, B): {:?}", stats.tally.as_array());
//!
//! // Two greedy trained agents should draw.
//! let outcome = umpire.play().unwrap();
//! println!("{}", outcome);
//! ```
//!
//! # References
//!
//! - Sutton, R., Barto, A. "Reinforcement Learning: An Introduction", ch. 1 (tic-tac-toe example)

pub mod agent;
pub mod config;
pub mod table;
pub mod umpire;

// Re-export main types for convenient access
pub use agent::{Competitor, ValueAgent};
pub use config::{ConfigError, Tally, TrainingConfig, TrainingStats};
pub use table::{ValueTable, NEUTRAL_VALUE};
pub use umpire::{run_episode, self_play_trials, Umpire};

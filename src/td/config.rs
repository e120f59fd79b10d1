//! Configuration and statistics for TD training.
//!
//! This module provides the settings that drive a training run (episode
//! count, exploration rate, learning rate, seed) and the counters collected
//! while it runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tictactoe::{Outcome, Player};

/// Configuration for training a pair of value agents.
///
/// # Example
/// ```
/// use ttt_td::td::TrainingConfig;
///
/// let config = TrainingConfig::default().with_epsilon(0.05).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play episodes per training run. Must be positive.
    pub episodes: u64,

    /// Exploration rate ε in `[0, 1]`.
    ///
    /// Probability that a training move is drawn uniformly from the legal
    /// actions instead of greedily from the value table.
    pub epsilon: f64,

    /// Learning rate α in `(0, 1]`, the step size of each backup.
    pub alpha: f64,

    /// Random seed for reproducibility.
    ///
    /// Each agent derives its own generator from this seed. If `None`, the
    /// generators are seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            epsilon: 0.1,
            alpha: 0.1,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the episode count.
    pub fn with_episodes(mut self, episodes: u64) -> Self {
        self.episodes = episodes;
        self
    }

    /// Builder method: set the exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder method: set the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.episodes == 0 {
            return Err(ConfigError::InvalidEpisodes);
        }

        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }

        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }

        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Seed for the agent playing `player`, if the run is seeded.
    pub(crate) fn agent_seed(&self, player: Player) -> Option<u64> {
        self.seed
            .map(|seed| seed.wrapping_mul(2).wrapping_add(player.index() as u64))
    }
}

/// Errors that can occur when loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Zero training episodes.
    #[error("episode count must be positive")]
    InvalidEpisodes,

    /// Exploration rate outside `[0, 1]`.
    #[error("exploration rate {0} is out of range [0, 1]")]
    InvalidEpsilon(f64),

    /// Learning rate outside `(0, 1]`.
    #[error("learning rate {0} is out of range (0, 1]")]
    InvalidAlpha(f64),

    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for this shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Win/loss/tie counter over finished episodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Episodes ending with a full board and no line.
    pub ties: u64,
    /// Episodes won by A.
    pub a_wins: u64,
    /// Episodes won by B.
    pub b_wins: u64,
}

impl Tally {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished episode. Unfinished outcomes are ignored.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Tie => self.ties += 1,
            Outcome::Win(Player::A) => self.a_wins += 1,
            Outcome::Win(Player::B) => self.b_wins += 1,
            Outcome::Unfinished => debug_assert!(false, "recorded an unfinished episode"),
        }
    }

    /// Number of episodes recorded.
    pub fn total(&self) -> u64 {
        self.ties + self.a_wins + self.b_wins
    }

    /// Counts in the order (tie, A wins, B wins).
    pub fn as_array(&self) -> [u64; 3] {
        [self.ties, self.a_wins, self.b_wins]
    }

    /// Fraction of episodes that ended in a tie.
    pub fn tie_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.ties as f64 / n as f64,
        }
    }
}

/// Statistics tracked during training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Episodes completed in the current training run.
    pub episodes: u64,

    /// Outcomes of those episodes.
    pub tally: Tally,

    /// Time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Episodes per second.
    pub episodes_per_second: f64,

    /// Mean absolute change of agent A's value table since the previous
    /// progress report, if one has been taken.
    pub value_drift: Option<f64>,
}

impl TrainingStats {
    /// Zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update episodes per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.episodes_per_second = self.episodes as f64 / self.elapsed_seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TrainingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.episodes, 10_000);
    }

    #[test]
    fn test_validate_ranges() {
        let base = TrainingConfig::default();

        assert!(matches!(
            base.clone().with_episodes(0).validate(),
            Err(ConfigError::InvalidEpisodes)
        ));
        assert!(matches!(
            base.clone().with_epsilon(1.5).validate(),
            Err(ConfigError::InvalidEpsilon(_))
        ));
        assert!(matches!(
            base.clone().with_alpha(0.0).validate(),
            Err(ConfigError::InvalidAlpha(_))
        ));
        assert!(matches!(
            base.clone().with_alpha(f64::NAN).validate(),
            Err(ConfigError::InvalidAlpha(_))
        ));

        assert!(base.clone().with_epsilon(0.0).validate().is_ok());
        assert!(base.clone().with_epsilon(1.0).validate().is_ok());
        assert!(base.with_alpha(1.0).validate().is_ok());
    }

    #[test]
    fn test_from_json_str_uses_defaults() {
        let config = TrainingConfig::from_json_str(r#"{"episodes": 500, "seed": 3}"#).unwrap();
        assert_eq!(config.episodes, 500);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.alpha, 0.1);
    }

    #[test]
    fn test_from_json_str_rejects_bad_values() {
        assert!(matches!(
            TrainingConfig::from_json_str(r#"{"alpha": 2.0}"#),
            Err(ConfigError::InvalidAlpha(_))
        ));
        assert!(matches!(
            TrainingConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_agent_seeds_differ() {
        let config = TrainingConfig::default().with_seed(42);
        assert_ne!(config.agent_seed(Player::A), config.agent_seed(Player::B));
        assert_eq!(TrainingConfig::default().agent_seed(Player::A), None);
    }

    #[test]
    fn test_tally() {
        let mut tally = Tally::new();
        tally.record(Outcome::Tie);
        tally.record(Outcome::Win(Player::A));
        tally.record(Outcome::Win(Player::A));
        tally.record(Outcome::Win(Player::B));

        assert_eq!(tally.as_array(), [1, 2, 1]);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.tie_rate(), 0.25);
    }
}

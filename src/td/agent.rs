//! Epsilon-greedy value agent with backward TD(0) backups.
//!
//! The agent scores each legal move by the value of the state it leads to,
//! plays greedily (with random tie-breaking) or explores, and after the
//! episode walks the environment's trail backward pulling each state's value
//! toward its successor's:
//!
//! ```text
//! V(s_i) ← V(s_i) + α · (V(s_{i+1}) − V(s_i))    for i = n−1, …, 0
//! ```
//!
//! The terminal state's own value is never updated; it only feeds the pass.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::td::config::TrainingConfig;
use crate::td::table::ValueTable;
use crate::tictactoe::codec::{self, Cell, Outcome, Player, StateId, NUM_CELLS, NUM_STATES};
use crate::tictactoe::GameState;

/// Anything that can take a turn in the environment: a learning agent or a
/// human at the console.
pub trait Competitor {
    /// The mark this competitor plays.
    fn player(&self) -> Player;

    /// Toggle exploration. Competitors that never explore ignore this.
    fn set_training(&mut self, _training: bool) {}

    /// Choose and apply one move, returning the resulting outcome.
    fn take_turn(&mut self, env: &mut GameState) -> Result<Outcome>;

    /// Called once when a non-training game ends.
    fn game_over(&mut self, _outcome: Outcome) -> Result<()> {
        Ok(())
    }
}

/// Tabular state-value learner for one player.
#[derive(Debug, Clone)]
pub struct ValueAgent {
    player: Player,
    epsilon: f64,
    alpha: f64,
    training: bool,
    /// Prior built from terminal outcomes; restored by `reset`.
    initial: ValueTable,
    /// Live estimates, mutated only by backups.
    values: ValueTable,
    rng: StdRng,
    recent_action: Option<usize>,
}

impl ValueAgent {
    /// Create an agent for `player` with exploration rate `epsilon` and
    /// learning rate `alpha`. Starts in training mode with the prior table.
    pub fn new(player: Player, epsilon: f64, alpha: f64) -> Self {
        let initial = ValueTable::seeded(player);
        let values = initial.clone();

        Self {
            player,
            epsilon,
            alpha,
            training: true,
            initial,
            values,
            rng: StdRng::from_entropy(),
            recent_action: None,
        }
    }

    /// Create an agent from a training configuration, seeding its generator
    /// if the configuration is seeded.
    pub fn from_config(player: Player, config: &TrainingConfig) -> Self {
        let agent = Self::new(player, config.epsilon, config.alpha);
        match config.agent_seed(player) {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        }
    }

    /// Builder method: seed the agent's random number generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Discard all learning and restore the prior table.
    pub fn reset(&mut self) {
        self.values.copy_from(&self.initial);
    }

    /// `true` enables epsilon exploration; `false` plays purely greedily.
    pub fn set_mode(&mut self, training: bool) {
        self.training = training;
    }

    /// Whether epsilon exploration is enabled.
    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Learning rate.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Live value table.
    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Prior value table.
    pub fn initial_values(&self) -> &ValueTable {
        &self.initial
    }

    /// Last action this agent played.
    pub fn recent_action(&self) -> Option<usize> {
        self.recent_action
    }

    /// State reached when this agent marks `action` in `current_state`.
    ///
    /// # Errors
    /// Returns [`Error::StateOutOfRange`] for a bad `current_state` and
    /// [`Error::InvalidAction`] if `action` is off the board or its cell is
    /// already marked.
    pub fn compute_successor_state(
        &self,
        current_state: StateId,
        action: usize,
    ) -> Result<StateId> {
        let board = codec::decode(current_state)?;
        if action >= NUM_CELLS {
            return Err(Error::InvalidAction {
                action,
                reason: "out of range (must be 0-8)",
            });
        }
        if board.cell(action) != Cell::Empty {
            return Err(Error::InvalidAction {
                action,
                reason: "cell already occupied",
            });
        }
        Ok(codec::place(current_state, action, self.player))
    }

    /// Estimated value of each possible first move from the empty board.
    pub fn opening_values(&self) -> [f64; NUM_CELLS] {
        let mut values = [0.0; NUM_CELLS];
        for (action, value) in values.iter_mut().enumerate() {
            *value = self.values.get(codec::place(0, action, self.player));
        }
        values
    }

    /// Pick one of `valid_actions` given the value of each action's successor.
    ///
    /// In training mode, with probability ε the pick is uniform over all
    /// valid actions. Otherwise it is uniform over the actions whose
    /// successor value is maximal.
    ///
    /// # Errors
    /// Returns [`Error::NoLegalMove`] if `valid_actions` is empty. That means
    /// the turn loop asked for a move after the game ended.
    pub fn select_action(
        &mut self,
        valid_actions: &[usize],
        successor_values: &[f64],
    ) -> Result<usize> {
        debug_assert_eq!(valid_actions.len(), successor_values.len());

        if valid_actions.is_empty() {
            log::error!("player {} asked to move with no legal action", self.player);
            return Err(Error::NoLegalMove);
        }

        if self.training && self.rng.gen::<f64>() < self.epsilon {
            self.select_random_action(valid_actions)
        } else {
            self.select_best_action(valid_actions, successor_values)
        }
    }

    fn select_random_action(&mut self, valid_actions: &[usize]) -> Result<usize> {
        valid_actions
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalMove)
    }

    fn select_best_action(
        &mut self,
        valid_actions: &[usize],
        successor_values: &[f64],
    ) -> Result<usize> {
        let best = successor_values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let tied: Vec<usize> = valid_actions
            .iter()
            .zip(successor_values.iter())
            .filter(|(_, &value)| value == best)
            .map(|(&action, _)| action)
            .collect();

        tied.choose(&mut self.rng).copied().ok_or(Error::NoLegalMove)
    }

    /// Walk `trail` backward, pulling each state toward its successor.
    ///
    /// The last entry is only read. Trails shorter than two entries are a
    /// no-op.
    ///
    /// # Errors
    /// Returns [`Error::StateOutOfRange`] if any entry is not a valid state
    /// id. The table is left untouched in that case.
    pub fn backup_trail(&mut self, trail: &[StateId]) -> Result<()> {
        if let Some(&state) = trail.iter().find(|&&state| state >= NUM_STATES) {
            return Err(Error::StateOutOfRange(state));
        }
        self.backward_pass(trail);
        Ok(())
    }

    /// Back up the episode just completed in `env`.
    pub fn backup(&mut self, env: &GameState) {
        // The environment only records encoded boards.
        self.backward_pass(env.trail());
    }

    fn backward_pass(&mut self, trail: &[StateId]) {
        for i in (0..trail.len().saturating_sub(1)).rev() {
            let target = self.values.get(trail[i + 1]);
            self.values.step_toward(trail[i], target, self.alpha);
        }
    }
}

impl Competitor for ValueAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn set_training(&mut self, training: bool) {
        self.set_mode(training);
    }

    fn take_turn(&mut self, env: &mut GameState) -> Result<Outcome> {
        debug_assert_eq!(env.active_player(), self.player);

        let current = env.current_state();
        let valid_actions = env.valid_actions();
        let successor_values = valid_actions
            .iter()
            .map(|&action| {
                self.compute_successor_state(current, action)
                    .map(|next| self.values.get(next))
            })
            .collect::<Result<Vec<f64>>>()?;

        let action = self.select_action(&valid_actions, &successor_values)?;
        self.recent_action = Some(action);
        env.apply(action)
    }
}

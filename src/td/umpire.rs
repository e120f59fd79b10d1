//! Training and evaluation loop.
//!
//! The umpire owns the environment and both value agents. It alternates
//! turns until the environment reports a terminal outcome, tallies the
//! result, and (when training) has every agent back up the episode's trail.

use std::time::Instant;

use rayon::prelude::*;

use crate::error::Result;
use crate::td::agent::{Competitor, ValueAgent};
use crate::td::config::{ConfigError, Tally, TrainingConfig, TrainingStats};
use crate::td::table::ValueTable;
use crate::tictactoe::{Board, GameState, Outcome, Player};

/// Drives self-play training and demo games between two value agents.
///
/// # Example
/// ```no_run
/// use ttt_td::td::{TrainingConfig, Umpire};
///
/// let mut umpire = Umpire::new(TrainingConfig::default().with_seed(1)).unwrap();
/// let stats = umpire.train(10_000).unwrap();
/// println!("win times (tie, A, B): {:?}", stats.tally.as_array());
///
/// let outcome = umpire.play().unwrap();
/// println!("demo game: {}", outcome);
/// ```
pub struct Umpire {
    config: TrainingConfig,
    environment: GameState,
    /// Agent for A in slot 0, agent for B in slot 1.
    agents: [ValueAgent; 2],
    stats: TrainingStats,
}

impl Umpire {
    /// Create an umpire with a fresh environment and two agents built from
    /// `config`.
    pub fn new(config: TrainingConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let agents = [
            ValueAgent::from_config(Player::A, &config),
            ValueAgent::from_config(Player::B, &config),
        ];

        Ok(Self {
            config,
            environment: GameState::new(),
            agents,
            stats: TrainingStats::new(),
        })
    }

    /// Train for the configured number of episodes.
    pub fn train_configured(&mut self) -> Result<&TrainingStats> {
        let episodes = self.config.episodes;
        self.train(episodes)
    }

    /// Reset both agents' tables, then run `episodes` self-play episodes.
    ///
    /// # Returns
    /// Statistics from the training run.
    pub fn train(&mut self, episodes: u64) -> Result<&TrainingStats> {
        self.train_with_callback(episodes, 0, |_| {})
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `episodes` - Number of episodes to run
    /// * `callback_interval` - How often to call the callback (0 disables it)
    /// * `callback` - Called every `callback_interval` episodes with the
    ///   running stats, including the value drift of agent A's table since
    ///   the previous call
    pub fn train_with_callback<F>(
        &mut self,
        episodes: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> Result<&TrainingStats>
    where
        F: FnMut(&TrainingStats),
    {
        log::info!(
            "training {} episodes (epsilon {}, alpha {})",
            episodes,
            self.config.epsilon,
            self.config.alpha
        );

        let start_time = Instant::now();
        self.stats = TrainingStats::new();
        for agent in self.agents.iter_mut() {
            agent.reset();
            agent.set_mode(true);
        }

        let mut snapshot: Option<ValueTable> = None;

        for i in 0..episodes {
            let outcome = self.run_training_episode()?;
            self.stats.episodes += 1;
            self.stats.tally.record(outcome);

            if callback_interval > 0 && (i + 1) % callback_interval == 0 {
                let current = self.agents[0].values();
                self.stats.value_drift = snapshot
                    .as_ref()
                    .map(|previous| current.mean_abs_difference(previous));
                snapshot = Some(current.clone());

                self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
                self.stats.update_rate();
                log::debug!(
                    "episode {}: win times {:?}, drift {:?}",
                    self.stats.episodes,
                    self.stats.tally.as_array(),
                    self.stats.value_drift
                );
                callback(&self.stats);
            }
        }

        // Final stats update
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.update_rate();

        log::info!(
            "trained {} episodes in {:.2}s, win times (tie, A, B) {:?}",
            self.stats.episodes,
            self.stats.elapsed_seconds,
            self.stats.tally.as_array()
        );

        Ok(&self.stats)
    }

    fn run_training_episode(&mut self) -> Result<Outcome> {
        self.environment.reset();

        let [agent_a, agent_b] = &mut self.agents;
        let outcome = run_episode(&mut self.environment, [agent_a, agent_b], |_| {})?;

        for agent in self.agents.iter_mut() {
            agent.backup(&self.environment);
        }

        Ok(outcome)
    }

    /// Play one greedy game between the two agents.
    pub fn play(&mut self) -> Result<Outcome> {
        self.play_observed(|_| {})
    }

    /// Play one greedy game, calling `observe` with the board after each move.
    pub fn play_observed<F>(&mut self, observe: F) -> Result<Outcome>
    where
        F: FnMut(&Board),
    {
        self.environment.reset();

        let [agent_a, agent_b] = &mut self.agents;
        agent_a.set_mode(false);
        agent_b.set_mode(false);

        let outcome = run_episode(&mut self.environment, [&mut *agent_a, &mut *agent_b], observe)?;
        agent_a.game_over(outcome)?;
        agent_b.game_over(outcome)?;
        Ok(outcome)
    }

    /// Play one game with `human` in A's slot against the trained B agent.
    ///
    /// The human competitor is told the outcome when the game ends.
    pub fn human_machine_play<H, F>(&mut self, human: &mut H, observe: F) -> Result<Outcome>
    where
        H: Competitor,
        F: FnMut(&Board),
    {
        debug_assert_eq!(human.player(), Player::A);
        self.environment.reset();

        let agent_b = &mut self.agents[1];
        agent_b.set_mode(false);
        human.set_training(false);

        let outcome = run_episode(&mut self.environment, [&mut *human, agent_b], observe)?;
        human.game_over(outcome)?;
        Ok(outcome)
    }

    /// Play `games` greedy games without learning and tally the outcomes.
    ///
    /// Greedy play only varies through random tie-breaking, so this measures
    /// how settled the learned policies are.
    pub fn evaluate(&mut self, games: u64) -> Result<Tally> {
        let mut tally = Tally::new();
        for _ in 0..games {
            tally.record(self.play()?);
        }
        Ok(tally)
    }

    /// The value agent playing `player`.
    pub fn agent(&self, player: Player) -> &ValueAgent {
        &self.agents[player.index()]
    }

    /// The environment of the last episode played.
    pub fn environment(&self) -> &GameState {
        &self.environment
    }

    /// Statistics of the last training run.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// The validated configuration this umpire was built from.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }
}

/// Alternate turns from the current environment state to a terminal outcome.
///
/// The competitor to move is picked by the environment's active player.
pub fn run_episode<F>(
    env: &mut GameState,
    competitors: [&mut dyn Competitor; 2],
    mut observe: F,
) -> Result<Outcome>
where
    F: FnMut(&Board),
{
    loop {
        let slot = env.active_player().index();
        debug_assert_eq!(competitors[slot].player(), env.active_player());

        let outcome = competitors[slot].take_turn(env)?;
        observe(env.board());

        if outcome.is_terminal() {
            return Ok(outcome);
        }
    }
}

/// Run independent train-then-play trials in parallel.
///
/// Every trial owns its umpire, environment and agents, so nothing is shared
/// between workers. Seeded configurations give each trial its own seed.
///
/// # Returns
/// The outcome of each trial's greedy demo game, in trial order.
pub fn self_play_trials(config: &TrainingConfig, trials: usize) -> Result<Vec<Outcome>> {
    config.validate()?;

    (0..trials)
        .into_par_iter()
        .map(|trial| {
            let mut trial_config = config.clone();
            trial_config.seed = config.seed.map(|seed| seed.wrapping_add(trial as u64));

            let mut umpire = Umpire::new(trial_config)?;
            umpire.train_configured()?;
            umpire.play()
        })
        .collect()
}

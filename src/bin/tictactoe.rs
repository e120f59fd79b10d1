//! Tic-tac-toe TD learning binary.
//!
//! Usage:
//!   cargo run --release --bin tictactoe -- [OPTIONS] <COMMAND>
//!
//! Commands:
//!   train    Train two agents by self-play and report win times
//!   play     Train, then watch the two agents play one greedy game
//!   human    Train, then play against agent B (you move first as X)
//!   trials   Run independent train-and-play trials in parallel
//!
//! Set `RUST_LOG=debug` for per-checkpoint training logs.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use ttt_td::console::{self, HumanPlayer};
use ttt_td::td::{self_play_trials, TrainingConfig, Umpire};
use ttt_td::tictactoe::{Outcome, Player, SIZE};

/// Train tic-tac-toe agents with tabular TD value learning.
#[derive(Parser)]
#[command(name = "tictactoe", about = "Tabular TD learning for tic-tac-toe")]
struct Cli {
    /// Path to JSON configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override number of training episodes
    #[arg(long, short)]
    episodes: Option<u64>,

    /// Override exploration rate (0 to 1)
    #[arg(long)]
    epsilon: Option<f64>,

    /// Override learning rate (0 exclusive to 1)
    #[arg(long)]
    alpha: Option<f64>,

    /// Random seed
    #[arg(long, short)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train and print the training statistics
    Train {
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        /// Print each agent's value of every opening move
        #[arg(long)]
        show_values: bool,
    },
    /// Train, then play one greedy game between the agents
    Play,
    /// Train, then play against the trained agent
    Human,
    /// Run independent train-and-play trials in parallel
    Trials {
        /// Number of trials
        #[arg(long, default_value_t = 8)]
        count: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TrainingConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TrainingConfig::default(),
    };

    // Apply CLI overrides
    if let Some(episodes) = cli.episodes {
        config.episodes = episodes;
    }
    if let Some(epsilon) = cli.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(alpha) = cli.alpha {
        config.alpha = alpha;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    config.validate().context("invalid configuration")?;

    if let Command::Trials { count } = cli.command {
        return run_trials(&config, count);
    }

    let mut umpire = Umpire::new(config.clone())?;
    train(&mut umpire, config.episodes)?;

    match cli.command {
        Command::Train { json, show_values } => {
            let stats = umpire.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(stats)?);
            } else {
                let [ties, a_wins, b_wins] = stats.tally.as_array();
                let config = umpire.config();
                println!(
                    "Trained with epsilon {}, alpha {}, seed {:?}",
                    config.epsilon, config.alpha, config.seed
                );
                println!(
                    "Win times over {} episodes: tie {}, A {}, B {} ({:.0} episodes/s)",
                    stats.episodes, ties, a_wins, b_wins, stats.episodes_per_second
                );
            }
            if show_values {
                for player in [Player::A, Player::B] {
                    let agent = umpire.agent(player);
                    println!(
                        "\nOpening move values for {} (epsilon {}, alpha {}):",
                        player,
                        agent.epsilon(),
                        agent.alpha()
                    );
                    print_grid(&agent.opening_values());
                }
            }
        }
        Command::Play => {
            println!("Two trained agents play one game:");
            let outcome = umpire.play_observed(|board| println!("{}", console::render(board)))?;
            println!("Result: {}", outcome);
        }
        Command::Human => {
            println!("You are X and move first. Keys map to cells:");
            print_keys();
            let stdin = io::stdin();
            let mut human = HumanPlayer::new(Player::A, stdin.lock(), BufWriter::new(io::stdout()));
            let outcome = umpire
                .human_machine_play(&mut human, |board| println!("\n{}", console::render(board)))?;
            drop(human);
            log::info!("human game finished: {}", outcome);
        }
        Command::Trials { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn train(umpire: &mut Umpire, episodes: u64) -> Result<()> {
    let progress = ProgressBar::new(episodes);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} episodes | {msg}",
        )?
        .progress_chars("=> "),
    );

    let interval = (episodes / 100).max(1);
    umpire.train_with_callback(episodes, interval, |stats| {
        progress.set_position(stats.episodes);
        let drift = stats
            .value_drift
            .map(|d| format!("{:.2e}", d))
            .unwrap_or_else(|| "-".to_string());
        progress.set_message(format!("ties {:.1}% drift {}", stats.tally.tie_rate() * 100.0, drift));
    })?;

    progress.finish_and_clear();
    Ok(())
}

fn run_trials(config: &TrainingConfig, count: usize) -> Result<()> {
    println!(
        "Running {} trials of {} episodes each (epsilon {}, alpha {})",
        count, config.episodes, config.epsilon, config.alpha
    );

    let outcomes = self_play_trials(config, count)?;
    let ties = outcomes.iter().filter(|&&o| o == Outcome::Tie).count();
    for (i, outcome) in outcomes.iter().enumerate() {
        println!("  trial {:>3}: {}", i + 1, outcome);
    }
    println!("{} of {} trained games were ties", ties, count);
    Ok(())
}

fn print_grid(values: &[f64]) {
    for row in values.chunks(SIZE) {
        let cells: Vec<String> = row.iter().map(|v| format!("{:.3}", v)).collect();
        println!("  {}", cells.join(" | "));
    }
}

fn print_keys() {
    for row in console::KEYS.chunks(SIZE) {
        let cells: Vec<String> = row.iter().map(|k| k.to_string()).collect();
        println!("  {}", cells.join(" | "));
    }
}

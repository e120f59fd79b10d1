//! Benchmarks for TD training.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ttt_td::td::{TrainingConfig, Umpire, ValueTable};
use ttt_td::tictactoe::{reachable_states, Player};

fn training_episode_benchmark(c: &mut Criterion) {
    let config = TrainingConfig::default().with_seed(42);
    let mut umpire = Umpire::new(config).unwrap();

    c.bench_function("train_100_episodes", |b| {
        b.iter(|| black_box(umpire.train(100).unwrap().tally))
    });
}

fn table_seeding_benchmark(c: &mut Criterion) {
    c.bench_function("seed_value_table", |b| {
        b.iter(|| ValueTable::seeded(black_box(Player::A)))
    });
}

fn reachable_states_benchmark(c: &mut Criterion) {
    c.bench_function("reachable_states", |b| b.iter(|| reachable_states().len()));
}

criterion_group!(
    benches,
    training_episode_benchmark,
    table_seeding_benchmark,
    reachable_states_benchmark
);
criterion_main!(benches);

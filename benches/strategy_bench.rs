//! Benchmarks for progression detection and strategy decisions.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use szemeredi_game::game::{find_all_progressions, generate_pool_with_planted_progression, has_progression};
use szemeredi_game::strategy::{
    FastHeuristicStrategy, MctsConfig, MctsStrategy, PositionView, Strategy,
};

fn sample_pool() -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(42);
    match generate_pool_with_planted_progression(4, 30, 1, 100, &mut rng) {
        Ok((pool, _)) => pool,
        Err(_) => (1..=30).collect(),
    }
}

fn detector_benchmark(c: &mut Criterion) {
    let pool = sample_pool();

    c.bench_function("has_progression_k4_x30", |b| {
        b.iter(|| has_progression(black_box(4), black_box(&pool)))
    });

    c.bench_function("find_all_progressions_k4_x30", |b| {
        b.iter(|| find_all_progressions(black_box(4), black_box(&pool)))
    });
}

fn decision_benchmark(c: &mut Criterion) {
    let pool = sample_pool();
    let own: Vec<i64> = pool.iter().copied().step_by(4).take(4).collect();
    let opponent: Vec<i64> = pool.iter().copied().skip(1).step_by(4).take(4).collect();
    let available: Vec<i64> = pool
        .iter()
        .copied()
        .filter(|v| !own.contains(v) && !opponent.contains(v))
        .collect();
    let view = PositionView::new(&available, &own, &opponent, 4);

    c.bench_function("heuristic_fast_decision", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| FastHeuristicStrategy.choose_move(black_box(&view), &mut rng))
    });

    let mcts = MctsStrategy::new(MctsConfig::default());
    c.bench_function("mcts_1000_decision", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| mcts.choose_move(black_box(&view), &mut rng))
    });
}

criterion_group!(benches, detector_benchmark, decision_benchmark);
criterion_main!(benches);

//! Benchmarks for the slice rotation engine.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cubeturn::cubes::{Address, Axis, Layer};
use cubeturn::geometry::turn_address;
use cubeturn::{Move, Puzzle, RotationEngine, Turn};

/// Benchmark a complete dispatch, animation and commit of one turn.
fn bench_turn_cycle(c: &mut Criterion) {
    let request = Turn::new(Move::Right, false).request(Duration::from_millis(160));

    c.bench_function("turn_cycle", |b| {
        b.iter_batched(
            RotationEngine::default,
            |mut engine| {
                engine.dispatch(black_box(&request)).unwrap();
                while engine.is_busy() {
                    engine.update(Duration::from_millis(16));
                }
                engine
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

/// Benchmark a scrambled sequence of instant turns.
fn bench_turn_sequence(c: &mut Criterion) {
    let turns: Vec<Turn> = "R U R' U' F B' L D"
        .split_whitespace()
        .map(|token| token.parse().unwrap())
        .collect();

    c.bench_function("turn_sequence_8", |b| {
        b.iter(|| {
            let mut engine = RotationEngine::default();
            for turn in &turns {
                engine.apply_now(&turn.request(Duration::ZERO)).unwrap();
            }
            engine
        })
    });
}

/// Benchmark looking up one layer in the registry.
fn bench_lookup_layer(c: &mut Criterion) {
    let puzzle = Puzzle::default();

    c.bench_function("lookup_layer", |b| {
        b.iter(|| {
            puzzle
                .registry()
                .lookup_layer(black_box(Axis::Y), black_box(Layer::Positive))
                .len()
        })
    });
}

/// Benchmark permuting an address by a quarter turn.
fn bench_turn_address(c: &mut Criterion) {
    let address = Address::new(Layer::Positive, Layer::Positive, Layer::Negative);

    c.bench_function("turn_address", |b| {
        b.iter(|| turn_address(black_box(address), black_box(Axis::Z), black_box(3)))
    });
}

criterion_group!(
    benches,
    bench_turn_cycle,
    bench_turn_sequence,
    bench_lookup_layer,
    bench_turn_address
);
criterion_main!(benches);

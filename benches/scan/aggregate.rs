use criterion::{BenchmarkId, Criterion};
use lmpscan::{AggregationEngine, NodeAccumulator};
use std::hint::black_box;

fn sample_lines(rows: usize, nodes: i32) -> Vec<String> {
    (0..rows)
        .map(|i| {
            let mut columns = vec!["x".to_string(); 24];
            columns[7] = "10.5".to_string();
            columns[8] = "0.3".to_string();
            columns[9] = "20.1".to_string();
            columns[17] = "9.0".to_string();
            columns[18] = "0.4".to_string();
            columns[19] = "19.0".to_string();
            columns[20] = format!("2023-06-01 {:02}:30:00", i % 24);
            columns[21] = ((i as i32) % nodes).to_string();
            columns[22] = "ZONE_A".to_string();
            columns[23] = ((i as f64 * 0.37).sin() * 5.0).to_string();
            columns.join(",")
        })
        .collect()
}

/// Register all benchmarks for accumulation and the parallel engine
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stats - Aggregate");

    group.bench_function("accumulator_update", |b| {
        b.iter(|| {
            let mut acc = NodeAccumulator::new();
            for i in 0..1000 {
                let spread = (i as f64 * 0.37).sin() * 5.0;
                acc.update(spread, spread * 0.6, spread * 0.4, (i % 24) as i32, "Z", 1);
            }
            black_box(acc)
        })
    });

    group.bench_function("accumulator_merge", |b| {
        let mut left = NodeAccumulator::new();
        let mut right = NodeAccumulator::new();
        for i in 0..1000 {
            let spread = (i as f64 * 0.37).sin() * 5.0;
            left.update(spread, spread * 0.6, spread * 0.4, (i % 24) as i32, "Z", 1);
            right.update(-spread, spread * 0.2, spread * 0.8, (i % 24) as i32, "Z", 1);
        }
        b.iter(|| {
            let mut merged = left.clone();
            merged.merge(black_box(&right));
            black_box(merged)
        })
    });

    let lines = sample_lines(20_000, 50);
    for workers in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("engine_worker_scaling", workers),
            &workers,
            |b, &workers| {
                let engine = AggregationEngine::with_workers(workers);
                b.iter(|| black_box(engine.run(&lines)))
            },
        );
    }

    group.finish();
}

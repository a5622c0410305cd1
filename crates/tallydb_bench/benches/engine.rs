//! Engine operation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tallydb_bench::{populated_engine, random_set_lines};
use tallydb_core::{Command, Engine};

/// Benchmark autocommit SETs.
fn bench_autocommit_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("autocommit_set");

    for keys in [16, 1024, 65536].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(keys), keys, |b, &keys| {
            let mut engine = populated_engine(keys, 8);
            let commands: Vec<Command> = random_set_lines(1024, keys, 8)
                .iter()
                .map(|line| Command::parse(line))
                .collect();
            let mut i = 0;

            b.iter(|| {
                engine.execute(black_box(&commands[i % commands.len()])).unwrap();
                i += 1;
            });
        });
    }
    group.finish();
}

/// Benchmark NUMEQUALTO against a large store.
fn bench_num_equal_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("num_equal_to");

    for keys in [1024, 65536].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(keys), keys, |b, &keys| {
            let engine = populated_engine(keys, 16);
            b.iter(|| black_box(engine.num_equal_to(black_box("v7"))));
        });
    }
    group.finish();
}

/// Benchmark BEGIN + writes + ROLLBACK cycles.
fn bench_rollback(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollback");

    for writes in [1, 10, 100].iter() {
        group.throughput(Throughput::Elements(*writes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(writes), writes, |b, &writes| {
            let mut engine = populated_engine(1024, 8);
            let lines = random_set_lines(writes, 1024, 8);

            b.iter(|| {
                engine.begin().unwrap();
                for line in &lines {
                    engine.execute_line(line).unwrap();
                }
                engine.rollback().unwrap();
            });
        });
    }
    group.finish();
}

/// Benchmark deeply nested commits.
fn bench_nested_commit(c: &mut Criterion) {
    c.bench_function("nested_commit_depth_32", |b| {
        let mut engine = Engine::new();
        b.iter(|| {
            for depth in 0..32 {
                engine.begin().unwrap();
                engine.set("k", &depth.to_string()).unwrap();
            }
            engine.commit().unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_autocommit_set,
    bench_num_equal_to,
    bench_rollback,
    bench_nested_commit
);
criterion_main!(benches);

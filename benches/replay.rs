use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use csim::{CacheConfig, OperationKind, OperationRecord, TraceError, replay};

/// Deterministic pseudo-random trace (xorshift) over a `span`-byte window.
fn synthetic_trace(len: usize, span: u64) -> Vec<OperationRecord> {
    let mut x: u64 = 0x9e37_79b9_7f4a_7c15;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            let kind = match x % 4 {
                0 => OperationKind::Load,
                1 => OperationKind::Store,
                2 => OperationKind::Modify,
                _ => OperationKind::InstructionFetch,
            };
            OperationRecord::new(kind, (x >> 8) % span)
        })
        .collect()
}

fn bench_replay(c: &mut Criterion) {
    let trace = synthetic_trace(100_000, 1 << 20);
    let mut group = c.benchmark_group("replay");
    group.throughput(Throughput::Elements(trace.len() as u64));

    for (s, e, b) in [(5, 1, 5), (4, 4, 6), (2, 16, 6)] {
        let config = CacheConfig::new(s, e, b).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("s{s}_E{e}_b{b}")),
            &config,
            |bench, &config| {
                bench.iter(|| {
                    let source = trace.iter().map(|r| Ok::<_, TraceError>(*r));
                    black_box(replay(config, source).unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);

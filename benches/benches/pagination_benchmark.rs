//! Pagination and normalization benchmarks against an in-memory exchange.
//!
//! Run with: `cargo bench --package candela-bench`

use candela_bench::SyntheticExchange;
use candela_lib::{Kline, PaginationConfig, Paginator, Timeframe, compute_log_returns, normalize};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::time::Duration;

const LATEST: i64 = 1_700_000_000_000 - 1_700_000_000_000 % 60_000;

fn pagination_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");
    let exchange = SyntheticExchange::new(LATEST, 50_000);
    let config = PaginationConfig::default().with_pause(Duration::ZERO);

    let mut group = c.benchmark_group("paginate");
    for limit in [1_000usize, 5_000, 20_000] {
        group.throughput(Throughput::Elements(limit as u64));
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.to_async(&runtime).iter(|| async {
                Paginator::new(&exchange, config)
                    .fetch("BTCUSDT", Timeframe::Minute1, limit)
                    .await
                    .expect("fetch")
            });
        });
    }
    group.finish();
}

fn normalize_benchmark(c: &mut Criterion) {
    let rows: Vec<Kline> = (0..20_000)
        .map(|k| match SyntheticExchange::row(LATEST - k * 60_000) {
            serde_json::Value::Array(fields) => Kline::new(fields),
            _ => unreachable!(),
        })
        .rev()
        .collect();

    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("20k", |b| b.iter(|| normalize(&rows).expect("normalize")));

    let table = normalize(&rows).expect("normalize");
    group.bench_function("log_returns_20k", |b| {
        b.iter(|| compute_log_returns(&table, "close", None).expect("log returns"));
    });
    group.finish();
}

criterion_group!(benches, pagination_benchmark, normalize_benchmark);
criterion_main!(benches);

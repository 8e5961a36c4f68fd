//! Routing benchmarks for both engines.
//!
//! Run with: `cargo bench -p checkpoint-router`

use checkpoint_router::{LinearRouter, Router};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;

fn patterns(num_routes: usize) -> Vec<String> {
    let mut patterns = Vec::with_capacity(num_routes);
    for i in 0..num_routes / 3 {
        patterns.push(format!("/api/v1/resource{i}"));
        patterns.push(format!("/api/v1/resource{i}/{{id}}"));
        patterns.push(format!("/api/v1/org/{{orgId}}/resource{i}/{{id}}"));
    }
    patterns
}

fn build_radix(num_routes: usize) -> Router<usize> {
    let mut router = Router::new();
    for (i, pattern) in patterns(num_routes).iter().enumerate() {
        router
            .route(Method::GET, pattern, i)
            .expect("benchmark patterns are well formed");
    }
    router
}

fn build_linear(num_routes: usize) -> LinearRouter<usize> {
    let mut router = LinearRouter::new();
    for (i, pattern) in patterns(num_routes).iter().enumerate() {
        router.add_route(Some(Method::GET), pattern, i);
    }
    router
}

fn bench_param_match(c: &mut Criterion) {
    let radix = build_radix(99);
    let linear = build_linear(99);
    let path = "/api/v1/resource25/12345";

    c.bench_function("radix_param_match", |b| {
        b.iter(|| black_box(radix.match_route(&Method::GET, black_box(path))));
    });
    c.bench_function("linear_param_match", |b| {
        b.iter(|| black_box(linear.match_route(&Method::GET, black_box(path))));
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_count_scaling");

    for size in [12, 99, 498] {
        let radix = build_radix(size);
        let linear = build_linear(size);
        let last = size / 3 - 1;
        let path = format!("/api/v1/org/acme/resource{last}/42");

        group.bench_with_input(BenchmarkId::new("radix", size), &path, |b, path| {
            b.iter(|| black_box(radix.match_route(&Method::GET, path)));
        });
        group.bench_with_input(BenchmarkId::new("linear", size), &path, |b, path| {
            b.iter(|| black_box(linear.match_route(&Method::GET, path)));
        });
    }

    group.finish();
}

fn bench_no_match(c: &mut Criterion) {
    let radix = build_radix(99);

    c.bench_function("radix_no_match", |b| {
        b.iter(|| black_box(radix.match_route(&Method::GET, black_box("/nonexistent/path"))));
    });
}

criterion_group!(benches, bench_param_match, bench_scaling, bench_no_match);
criterion_main!(benches);

//! Text benchmark: Measure sanitizer and truncation cost per fragment.
//!
//! Target: plain fragments stay allocation-free through the sanitizer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use logsink::{strip_ansi, truncate_to_line_boundary};

fn strip_plain(c: &mut Criterion) {
    let line = "   Compiling logsink v0.1.0 (/home/user/src/logsink)\n";
    c.bench_function("strip_plain_line", |b| {
        b.iter(|| strip_ansi(black_box(line)));
    });
}

fn strip_colored(c: &mut Criterion) {
    let line = "\x1b[1m\x1b[32m   Compiling\x1b[0m logsink v0.1.0 (/home/user/src/logsink)\n";
    c.bench_function("strip_colored_line", |b| {
        b.iter(|| strip_ansi(black_box(line)));
    });
}

fn truncate_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("truncate");
    let line = "warning: unused variable `x` in src/main.rs:42\n";

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        let source = line.repeat(size / line.len() + 64);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || source.clone(),
                |mut content| truncate_to_line_boundary(black_box(&mut content), size),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, strip_plain, strip_colored, truncate_sizes);
criterion_main!(benches);

//! Benchmark for placeholder partial application.
//!
//! Measures construction, chained application and final calls.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lambars_partial::{Applied, Arguments, Function, Value, arguments, call, partial};
use std::hint::black_box;

fn sum() -> Function {
    Function::new("sum", |arguments| {
        let total = arguments.positional.iter().filter_map(Value::as_int).sum();
        Ok(Value::Int(total))
    })
}

// =============================================================================
// Construction Benchmarks
// =============================================================================

fn benchmark_construct(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("construct");
    let function = sum();

    group.bench_function("left_only", |bencher| {
        bencher.iter(|| black_box(partial!(function.clone(), 1, 2, 3).unwrap()));
    });

    group.bench_function("both_ends", |bencher| {
        bencher.iter(|| black_box(partial!(function.clone(), 1, __, 3; scale = 2).unwrap()));
    });

    let inner = partial!(function.clone(), 1, __, 4).unwrap();
    group.bench_function("flatten", |bencher| {
        bencher.iter(|| black_box(partial!(inner.clone(), 2, __, 3).unwrap()));
    });

    group.finish();
}

// =============================================================================
// Call Benchmarks
// =============================================================================

fn benchmark_call(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("call");

    for bound in [1_i64, 8, 64] {
        let positional = (0..bound).map(Value::Int).collect::<Vec<_>>();
        let applied = Applied::construct(sum(), Arguments::positional(positional)).unwrap();

        group.bench_with_input(
            BenchmarkId::new("final", bound),
            &applied,
            |bencher, applied| {
                bencher.iter(|| black_box(call!(applied, 1, 2).unwrap()));
            },
        );
    }

    let applied = partial!(sum(), 1, __).unwrap();
    group.bench_function("further", |bencher| {
        bencher.iter(|| black_box(applied.call(arguments!(2, __)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, benchmark_construct, benchmark_call);
criterion_main!(benches);

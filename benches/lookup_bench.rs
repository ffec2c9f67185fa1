// In benches/lookup_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashSet;

use pandera_dtypes::{platform, PandasDtype};

// --- Mock column dtypes, as a schema check would observe them ---

const OBSERVED_ALIASES: [&str; 8] = [
    "int64",
    "float64",
    "object",
    "datetime64[ns]",
    "category",
    "bool",
    "uint8",
    "Int64", // nullable extension dtype, not in the table
];

const INFERRED_KINDS: [&str; 6] = [
    "integer",
    "floating",
    "mixed-integer-float",
    "string",
    "datetime",
    "empty",
];

// --- Benchmark Suite ---

fn bench_lookups(c: &mut Criterion) {
    // Resolve the defaults outside the timed region.
    let _ = platform::defaults();

    let mut group = c.benchmark_group("Lookups");

    group.bench_function("from_str_alias", |b| {
        b.iter(|| {
            for alias in OBSERVED_ALIASES {
                black_box(PandasDtype::from_str_alias(black_box(alias)));
            }
        })
    });

    group.bench_function("from_pandas_api_type", |b| {
        b.iter(|| {
            for kind in INFERRED_KINDS {
                black_box(PandasDtype::from_pandas_api_type(black_box(kind)));
            }
        })
    });

    group.bench_function("str_alias_all", |b| {
        b.iter(|| {
            for dtype in PandasDtype::ALL {
                black_box(black_box(dtype).str_alias());
            }
        })
    });

    group.finish();
}

fn bench_schema_match(c: &mut Criterion) {
    let _ = platform::defaults();

    let mut group = c.benchmark_group("Schema Match");

    // A requested type against an observed column dtype, as in a schema check.
    group.bench_function("requested_vs_observed", |b| {
        b.iter(|| {
            let requested = black_box(PandasDtype::Int);
            let observed = PandasDtype::from_str_alias(black_box("int64"));
            black_box(observed == Some(requested))
        })
    });

    group.bench_function("hash_set_all", |b| {
        b.iter(|| {
            let set: HashSet<PandasDtype> = black_box(PandasDtype::ALL).into_iter().collect();
            black_box(set.len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lookups, bench_schema_match);
criterion_main!(benches);

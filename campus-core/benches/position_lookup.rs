//! Criterion benchmarks for building the position index and querying a map.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package campus-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use campus_core::{CampusMap, ElementKind, PositionStore, RawElement, Tags};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Node counts to benchmark.
const MAP_SIZES: &[i64] = &[1_000, 10_000, 100_000];

/// Nodes per synthetic building footprint.
const NODES_PER_BUILDING: i64 = 4;

/// Synthetic grid of nodes with a building over every fourth block and a
/// fast food amenity every hundred nodes.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "synthetic coordinates are derived from node identifiers"
)]
fn synthetic_map(nodes: i64) -> Vec<RawElement> {
    let mut elements = Vec::new();
    for id in 0..nodes {
        let lat = 42.0 + (id % 1_000) as f64 * 1.0e-5;
        let lon = -87.0 + (id / 1_000) as f64 * 1.0e-5;
        let mut tags = Tags::new();
        if id % 100 == 0 {
            tags.insert("amenity".into(), "fast_food".into());
            tags.insert("name".into(), format!("Outlet {id}"));
        }
        elements.push(RawElement::new(id, ElementKind::Node { lat, lon }, tags));
    }
    for first in (0..nodes).step_by(16) {
        let refs = (first..first + NODES_PER_BUILDING).collect();
        let tags = Tags::from([
            ("building".into(), "university".into()),
            ("name".into(), format!("Hall {first}")),
        ]);
        elements.push(RawElement::new(
            nodes + first,
            ElementKind::Way { refs },
            tags,
        ));
    }
    elements
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_store_build");
    for &size in MAP_SIZES {
        let elements = synthetic_map(size);
        group.throughput(Throughput::Elements(elements.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &elements, |b, input| {
            b.iter(|| PositionStore::build(black_box(input)));
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_store_lookup");
    for &size in MAP_SIZES {
        let store = PositionStore::build(&synthetic_map(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, input| {
            b.iter(|| (0..size).filter_map(|id| input.lookup(black_box(id))).count());
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_fast_food");
    for &size in MAP_SIZES {
        let map = CampusMap::from_elements(&synthetic_map(size), "university");
        group.bench_with_input(BenchmarkId::from_parameter(size), &map, |b, input| {
            b.iter(|| input.nearest(black_box("Hall 16"), black_box("fast_food")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup, bench_nearest);
criterion_main!(benches);

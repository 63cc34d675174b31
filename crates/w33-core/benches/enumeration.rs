// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use w33_core::cliques::{maximal_cliques, maximum_coclique};
use w33_core::spreads::enumerate_spreads;
use w33_core::triangles::classify_triples;
use w33_core::{Graph, Quadrangle};

fn bench_construction(c: &mut Criterion) {
    c.bench_function("quadrangle_build", |b| {
        b.iter(|| black_box(Quadrangle::build()));
    });

    let gq = Quadrangle::build();
    c.bench_function("collinearity_graph", |b| {
        b.iter(|| black_box(Graph::collinearity(&gq)));
    });
}

fn bench_enumeration(c: &mut Criterion) {
    let gq = Quadrangle::build();
    let graph = Graph::collinearity(&gq);

    c.bench_function("triple_census", |b| {
        b.iter(|| black_box(classify_triples(&graph)));
    });

    c.bench_function("maximal_cliques", |b| {
        b.iter(|| black_box(maximal_cliques(&graph)));
    });

    c.bench_function("spread_enumeration", |b| {
        b.iter(|| black_box(enumerate_spreads(&gq)));
    });

    let mut group = c.benchmark_group("exact_search");
    group.sample_size(10);
    group.bench_function("point_maximum_coclique", |b| {
        b.iter(|| black_box(maximum_coclique(&graph)));
    });
    group.finish();
}

criterion_group!(benches, bench_construction, bench_enumeration);
criterion_main!(benches);

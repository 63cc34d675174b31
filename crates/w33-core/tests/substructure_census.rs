// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Substructure enumeration against the literature counts: triangles,
//! cliques, cocliques and spreads.

use std::collections::BTreeSet;

use w33_core::cliques::{is_coclique, maximal_cliques, maximum_coclique, sampled_coclique};
use w33_core::spreads::enumerate_spreads;
use w33_core::triangles::{all_triangles_collinear, classify_triples, triangles, TripleCensus};
use w33_core::{Graph, Quadrangle};

#[test]
fn one_hundred_sixty_collinear_triangles() {
    let gq = Quadrangle::build();
    let graph = Graph::collinearity(&gq);
    let census = classify_triples(&graph);
    assert_eq!(census.triangles, 160);
    assert_eq!(census, TripleCensus::from_params(graph.srg_params().unwrap()));
    assert_eq!(triangles(&graph).len(), 160);
    assert!(all_triangles_collinear(&gq, &graph));
}

#[test]
fn maximal_cliques_are_exactly_the_lines() {
    let gq = Quadrangle::build();
    let graph = Graph::collinearity(&gq);
    let cliques = maximal_cliques(&graph);
    assert_eq!(cliques.len(), 40);
    assert!(cliques.iter().all(|c| c.len() == 4));

    let clique_sets: BTreeSet<Vec<usize>> = cliques.into_iter().collect();
    let line_sets: BTreeSet<Vec<usize>> = gq
        .lines()
        .iter()
        .map(|line| line.points().iter().map(|p| p.index()).collect())
        .collect();
    assert_eq!(clique_sets, line_sets);
}

#[test]
fn point_graph_has_no_ovoid() {
    // The ratio bound allows 10, but W(3,3) has no ovoid for odd q; the
    // exact search lands on the true maximum, known to be 7.
    let gq = Quadrangle::build();
    let graph = Graph::collinearity(&gq);
    let best = maximum_coclique(&graph);
    assert!(is_coclique(&graph, &best));
    assert!(
        (7..=9).contains(&best.len()),
        "point-graph independence number out of range: {}",
        best.len()
    );
}

#[test]
fn line_graph_maximum_coclique_is_a_spread() {
    let gq = Quadrangle::build();
    let line_graph = Graph::line_intersection(&gq);
    let best = maximum_coclique(&line_graph);
    assert_eq!(best.len(), 10);
    assert!(is_coclique(&line_graph, &best));

    // Ten pairwise non-meeting lines are pairwise disjoint, i.e. a spread.
    let ids: Vec<_> = best
        .iter()
        .map(|&i| w33_core::LineId(i as u8))
        .collect();
    assert!(w33_core::spreads::Spread::validate(&gq, &ids).is_ok());
}

#[test]
fn greedy_sampling_stays_below_the_exact_maximum() {
    let gq = Quadrangle::build();
    let graph = Graph::collinearity(&gq);
    let exact = maximum_coclique(&graph).len();
    let sampled = sampled_coclique(&graph, 64, Some(33));
    assert!(is_coclique(&graph, &sampled));
    assert!(!sampled.is_empty());
    assert!(sampled.len() <= exact);
}

#[test]
fn sampled_search_replays_per_seed() {
    let gq = Quadrangle::build();
    let graph = Graph::collinearity(&gq);
    assert_eq!(
        sampled_coclique(&graph, 32, Some(7)),
        sampled_coclique(&graph, 32, Some(7))
    );
}

#[test]
fn thirty_six_spreads_cover_the_points() {
    let gq = Quadrangle::build();
    let spreads = enumerate_spreads(&gq);
    assert_eq!(spreads.len(), 36);
    assert!(spreads.iter().all(|s| s.covers(&gq)));

    // Every line lies in the same number of spreads by transitivity.
    let mut per_line = vec![0usize; 40];
    for spread in &spreads {
        for id in spread.lines() {
            per_line[id.index()] += 1;
        }
    }
    assert!(per_line.iter().all(|&c| c == 36 * 10 / 40));
}

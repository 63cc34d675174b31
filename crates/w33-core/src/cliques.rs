// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Clique and coclique searches on the bitmask graphs.
//!
//! Three searches cover what the exploration runs need: Bron–Kerbosch with
//! pivoting enumerates every maximal clique (on the W33 point graph these are
//! exactly the 40 lines), a colouring-bounded branch-and-bound finds a true
//! maximum clique — run on the complement it certifies independence numbers —
//! and a randomized greedy pass reproduces the cheap sampling the scripts
//! used before committing to an exhaustive search. The greedy RNG is routed
//! through `w33-config` so a whole run is replayable from one seed.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::graph::{mask_vertices, Graph};

/// Every maximal clique, as ascending vertex lists, via Bron–Kerbosch with
/// pivoting.
pub fn maximal_cliques(graph: &Graph) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    bron_kerbosch(graph, 0, graph.full_mask(), 0, &mut out);
    debug!(
        target: "w33::cliques",
        count = out.len(),
        "enumerated maximal cliques"
    );
    out
}

fn bron_kerbosch(g: &Graph, clique: u64, mut pool: u64, mut excluded: u64, out: &mut Vec<Vec<usize>>) {
    if pool == 0 && excluded == 0 {
        out.push(mask_vertices(clique).collect());
        return;
    }
    // Branch only on non-neighbours of a pivot chosen to cover the pool.
    let pivot = mask_vertices(pool | excluded)
        .max_by_key(|&u| (g.neighbors(u) & pool).count_ones())
        .expect("pool or excluded set is nonempty");
    let mut candidates = pool & !g.neighbors(pivot);
    while candidates != 0 {
        let v = candidates.trailing_zeros() as usize;
        let bit = 1u64 << v;
        candidates &= !bit;
        bron_kerbosch(
            g,
            clique | bit,
            pool & g.neighbors(v),
            excluded & g.neighbors(v),
            out,
        );
        pool &= !bit;
        excluded |= bit;
    }
}

/// A maximum clique, found by branch-and-bound with a greedy-colouring bound.
pub fn maximum_clique(graph: &Graph) -> Vec<usize> {
    let mut best = Vec::new();
    let mut current = Vec::new();
    expand(graph, graph.full_mask(), &mut current, &mut best);
    best.sort_unstable();
    debug!(
        target: "w33::cliques",
        size = best.len(),
        "maximum clique search finished"
    );
    best
}

/// A maximum coclique: a maximum clique of the complement graph.
pub fn maximum_coclique(graph: &Graph) -> Vec<usize> {
    maximum_clique(&graph.complement())
}

fn expand(g: &Graph, pool: u64, current: &mut Vec<usize>, best: &mut Vec<usize>) {
    if pool == 0 {
        if current.len() > best.len() {
            *best = current.clone();
        }
        return;
    }
    let (order, bounds) = colour_classes(g, pool);
    let mut pool = pool;
    for i in (0..order.len()).rev() {
        // Bounds rise with i, so once one fails the rest fail too.
        if current.len() + bounds[i] <= best.len() {
            return;
        }
        let v = order[i];
        current.push(v);
        expand(g, pool & g.neighbors(v), current, best);
        current.pop();
        pool &= !(1u64 << v);
    }
}

/// Greedy sequential colouring of the pool. Returns the vertices grouped by
/// ascending colour class together with each vertex's class number: a clique
/// inside the first i vertices can use at most one vertex per class, so the
/// class number bounds the clique size reachable from that prefix.
fn colour_classes(g: &Graph, pool: u64) -> (Vec<usize>, Vec<usize>) {
    let mut order = Vec::with_capacity(pool.count_ones() as usize);
    let mut bounds = Vec::with_capacity(order.capacity());
    let mut uncoloured = pool;
    let mut colour = 0usize;
    while uncoloured != 0 {
        colour += 1;
        let mut class = uncoloured;
        while class != 0 {
            let v = class.trailing_zeros() as usize;
            let bit = 1u64 << v;
            class &= !bit & !g.neighbors(v);
            uncoloured &= !bit;
            order.push(v);
            bounds.push(colour);
        }
    }
    (order, bounds)
}

/// One randomized-greedy coclique: repeatedly pick a vertex from the pool and
/// discard its neighbourhood. Under `W33_DETERMINISTIC_SEARCH` the pick is
/// always the lowest-index candidate instead of a random one.
pub fn greedy_coclique(graph: &Graph, rng: &mut StdRng) -> Vec<usize> {
    let locked = w33_config::determinism::lock_search_order();
    let mut pool = graph.full_mask();
    let mut picked = Vec::new();
    while pool != 0 {
        let choice = if locked {
            0
        } else {
            rng.gen_range(0..pool.count_ones())
        };
        let v = nth_set_bit(pool, choice);
        picked.push(v);
        pool &= !(1u64 << v) & !graph.neighbors(v);
    }
    picked.sort_unstable();
    picked
}

/// The best coclique over `restarts` greedy passes, seeded through the
/// deterministic configuration when no explicit seed is given.
pub fn sampled_coclique(graph: &Graph, restarts: usize, seed: Option<u64>) -> Vec<usize> {
    let mut rng = w33_config::determinism::rng_from_optional(seed, "coclique-greedy");
    let mut best: Vec<usize> = Vec::new();
    for round in 0..restarts {
        let picked = greedy_coclique(graph, &mut rng);
        if picked.len() > best.len() {
            debug!(
                target: "w33::search",
                round,
                size = picked.len(),
                "greedy coclique improved"
            );
            best = picked;
        }
    }
    best
}

/// Whether the vertices are pairwise adjacent.
pub fn is_clique(graph: &Graph, vertices: &[usize]) -> bool {
    vertices
        .iter()
        .enumerate()
        .all(|(i, &u)| vertices[i + 1..].iter().all(|&v| graph.adjacent(u, v)))
}

/// Whether the vertices are pairwise non-adjacent.
pub fn is_coclique(graph: &Graph, vertices: &[usize]) -> bool {
    vertices
        .iter()
        .enumerate()
        .all(|(i, &u)| vertices[i + 1..].iter().all(|&v| !graph.adjacent(u, v)))
}

fn nth_set_bit(mut mask: u64, mut n: u32) -> usize {
    loop {
        let v = mask.trailing_zeros() as usize;
        if n == 0 {
            return v;
        }
        mask &= mask - 1;
        n -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pentagon() -> Graph {
        let mut g = Graph::new(5);
        for i in 0..5 {
            g.add_edge(i, (i + 1) % 5);
        }
        g
    }

    #[test]
    fn pentagon_maximal_cliques_are_its_edges() {
        let cliques = maximal_cliques(&pentagon());
        assert_eq!(cliques.len(), 5);
        assert!(cliques.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn pentagon_extremes() {
        let g = pentagon();
        assert_eq!(maximum_clique(&g).len(), 2);
        let co = maximum_coclique(&g);
        assert_eq!(co.len(), 2);
        assert!(is_coclique(&g, &co));
    }

    #[test]
    fn complete_graph_is_one_clique() {
        let mut g = Graph::new(6);
        for u in 0..6 {
            for v in (u + 1)..6 {
                g.add_edge(u, v);
            }
        }
        let cliques = maximal_cliques(&g);
        assert_eq!(cliques, vec![vec![0, 1, 2, 3, 4, 5]]);
        assert_eq!(maximum_clique(&g).len(), 6);
        assert_eq!(maximum_coclique(&g).len(), 1);
    }

    #[test]
    fn greedy_cocliques_are_cocliques() {
        let g = pentagon();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let picked = greedy_coclique(&g, &mut rng);
            assert!(!picked.is_empty());
            assert!(is_coclique(&g, &picked));
        }
    }

    #[test]
    fn sampling_with_a_fixed_seed_replays() {
        let g = pentagon();
        let first = sampled_coclique(&g, 16, Some(99));
        let second = sampled_coclique(&g, 16, Some(99));
        assert_eq!(first, second);
        assert!(is_coclique(&g, &first));
    }

    #[test]
    fn predicates_accept_trivial_sets() {
        let g = pentagon();
        assert!(is_clique(&g, &[]));
        assert!(is_clique(&g, &[3]));
        assert!(is_coclique(&g, &[]));
        assert!(is_coclique(&g, &[2]));
    }
}

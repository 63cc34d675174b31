// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Graphs on at most 64 vertices as rows of `u64` bitmasks.
//!
//! Both graphs of interest here live on 40 vertices: the collinearity graph
//! of W(3,3) (points adjacent when perpendicular) and its line graph (lines
//! adjacent when they meet). Bitmask rows keep the substructure searches
//! branch-free: neighbourhood intersection is a single `&`.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::symplectic::{perp, Quadrangle};

/// Strongly-regular parameters (n, k, λ, μ).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrgParams {
    pub n: u32,
    pub k: u32,
    pub lambda: u32,
    pub mu: u32,
}

impl SrgParams {
    /// The counting identity `k(k − λ − 1) = (n − k − 1)·μ` every strongly
    /// regular graph satisfies.
    pub fn is_feasible(&self) -> bool {
        // Rearranged so both sides stay nonnegative even for infeasible
        // candidates with λ ≥ k.
        self.k * self.k + self.k * self.mu + self.mu
            == self.n * self.mu + self.k * self.lambda + self.k
    }

    /// Parameters of the complement graph.
    pub fn complement(&self) -> SrgParams {
        // Sums precede subtractions; every intermediate is nonnegative for
        // parameter sets whose complement is itself strongly regular.
        SrgParams {
            n: self.n,
            k: self.n - self.k - 1,
            lambda: self.n + self.mu - 2 - 2 * self.k,
            mu: self.n + self.lambda - 2 * self.k,
        }
    }
}

/// Iterates the vertex indices of a bitmask, ascending.
pub fn mask_vertices(mut mask: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            None
        } else {
            let v = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            Some(v)
        }
    })
}

/// An undirected graph stored as one adjacency bitmask per vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    rows: Vec<u64>,
}

impl Graph {
    /// An edgeless graph on `n` vertices. The bitmask representation caps
    /// the order at 64, far above the 40 needed here.
    pub fn new(n: usize) -> Graph {
        assert!(n <= 64, "bitmask graphs support at most 64 vertices");
        Graph {
            n,
            rows: vec![0; n],
        }
    }

    /// The collinearity graph of the quadrangle: points adjacent when
    /// perpendicular (equivalently, collinear).
    pub fn collinearity(gq: &Quadrangle) -> Graph {
        let mut g = Graph::new(gq.points().len());
        for (p, v) in gq.points().iter() {
            for (q, w) in gq.points().iter() {
                if p < q && perp(v, w) {
                    g.add_edge(p.index(), q.index());
                }
            }
        }
        g
    }

    /// The line graph of the quadrangle: lines adjacent when they share a
    /// point.
    pub fn line_intersection(gq: &Quadrangle) -> Graph {
        let lines = gq.lines();
        let mut g = Graph::new(lines.len());
        for (a, la) in lines.iter().enumerate() {
            for (b, lb) in lines.iter().enumerate() {
                if a < b && la.meets(lb) {
                    g.add_edge(a, b);
                }
            }
        }
        g
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u != v && u < self.n && v < self.n);
        self.rows[u] |= 1 << v;
        self.rows[v] |= 1 << u;
    }

    #[inline]
    pub fn adjacent(&self, u: usize, v: usize) -> bool {
        self.rows[u] >> v & 1 == 1
    }

    /// Neighbourhood of `u` as a bitmask.
    #[inline]
    pub fn neighbors(&self, u: usize) -> u64 {
        self.rows[u]
    }

    #[inline]
    pub fn degree(&self, u: usize) -> u32 {
        self.rows[u].count_ones()
    }

    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum::<usize>() / 2
    }

    #[inline]
    pub fn common_neighbors(&self, u: usize, v: usize) -> u32 {
        (self.rows[u] & self.rows[v]).count_ones()
    }

    /// Bitmask of all vertices.
    #[inline]
    pub fn full_mask(&self) -> u64 {
        if self.n == 64 {
            u64::MAX
        } else {
            (1u64 << self.n) - 1
        }
    }

    /// The complement graph (loops excluded).
    pub fn complement(&self) -> Graph {
        let full = self.full_mask();
        let rows = (0..self.n)
            .map(|u| (!self.rows[u] & full) & !(1u64 << u))
            .collect();
        Graph { n: self.n, rows }
    }

    /// Verifies strong regularity by exhaustive common-neighbour counting.
    /// Returns `None` when the graph is irregular or the counts disagree.
    pub fn srg_params(&self) -> Option<SrgParams> {
        let k = self.degree(0);
        if (1..self.n).any(|u| self.degree(u) != k) {
            return None;
        }
        let mut lambda: Option<u32> = None;
        let mut mu: Option<u32> = None;
        for u in 0..self.n {
            for v in (u + 1)..self.n {
                let c = self.common_neighbors(u, v);
                let slot = if self.adjacent(u, v) {
                    &mut lambda
                } else {
                    &mut mu
                };
                match slot {
                    Some(seen) if *seen != c => return None,
                    Some(_) => {}
                    None => *slot = Some(c),
                }
            }
        }
        Some(SrgParams {
            n: self.n as u32,
            k,
            lambda: lambda?,
            mu: mu?,
        })
    }

    /// Dense integer adjacency matrix.
    pub fn adjacency_matrix(&self) -> Array2<i64> {
        let mut m = Array2::<i64>::zeros((self.n, self.n));
        for u in 0..self.n {
            for v in 0..self.n {
                if self.adjacent(u, v) {
                    m[(u, v)] = 1;
                }
            }
        }
        m
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Census of vertex triples by induced edge count.
//!
//! In a strongly regular graph the whole census is already determined by the
//! parameters, so the enumeration here doubles as a consistency check: the
//! exhaustive classification and [`TripleCensus::from_params`] must agree.
//! For the W33 collinearity graph the 3-edge triples are exactly the
//! collinear triples — a triangle spans a totally isotropic subspace, which
//! cannot have dimension 3 — giving 40 lines × 4 triples = 160 triangles.

use tracing::debug;

use crate::graph::Graph;
use crate::graph::SrgParams;
use crate::point::PointId;
use crate::symplectic::Quadrangle;

/// Counts of vertex triples by the number of edges they induce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TripleCensus {
    /// Triples inducing no edge (3-cocliques).
    pub empty: usize,
    /// Triples inducing a single edge.
    pub one_edge: usize,
    /// Open cherries: paths of length two.
    pub two_edge: usize,
    /// Triangles.
    pub triangles: usize,
}

impl TripleCensus {
    /// Total number of classified triples, which must equal C(n, 3).
    pub fn total(&self) -> usize {
        self.empty + self.one_edge + self.two_edge + self.triangles
    }

    /// The census a strongly regular graph with these parameters must have.
    ///
    /// Triangles: n·k·λ/6. Cherries: n·k(k−1)/2 − 3·triangles. Single edges:
    /// each of the nk/2 edges extends by any vertex outside the closed union
    /// of the endpoint neighbourhoods, of which there are n − 2k + λ.
    pub fn from_params(params: SrgParams) -> TripleCensus {
        let n = params.n as i64;
        let k = params.k as i64;
        let lambda = params.lambda as i64;

        let triangles = n * k * lambda / 6;
        let two_edge = n * k * (k - 1) / 2 - 3 * triangles;
        let one_edge = (n * k / 2) * (n - 2 * k + lambda);
        let empty = n * (n - 1) * (n - 2) / 6 - triangles - two_edge - one_edge;
        debug_assert!(one_edge >= 0 && empty >= 0);

        TripleCensus {
            empty: empty as usize,
            one_edge: one_edge as usize,
            two_edge: two_edge as usize,
            triangles: triangles as usize,
        }
    }
}

/// Classifies every vertex triple of the graph by induced edge count.
pub fn classify_triples(graph: &Graph) -> TripleCensus {
    let n = graph.order();
    let mut census = TripleCensus::default();
    for u in 0..n {
        for v in (u + 1)..n {
            for w in (v + 1)..n {
                let edges = graph.adjacent(u, v) as usize
                    + graph.adjacent(u, w) as usize
                    + graph.adjacent(v, w) as usize;
                match edges {
                    0 => census.empty += 1,
                    1 => census.one_edge += 1,
                    2 => census.two_edge += 1,
                    _ => census.triangles += 1,
                }
            }
        }
    }
    debug!(
        target: "w33::triangles",
        triangles = census.triangles,
        cherries = census.two_edge,
        "classified vertex triples"
    );
    census
}

/// The vertex sets of all triangles, each ascending, in lexicographic order.
pub fn triangles(graph: &Graph) -> Vec<[usize; 3]> {
    let n = graph.order();
    let mut out = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if !graph.adjacent(u, v) {
                continue;
            }
            for w in (v + 1)..n {
                if graph.adjacent(u, w) && graph.adjacent(v, w) {
                    out.push([u, v, w]);
                }
            }
        }
    }
    out
}

/// Whether every triangle of the collinearity graph lies on a single line.
pub fn all_triangles_collinear(gq: &Quadrangle, graph: &Graph) -> bool {
    triangles(graph).iter().all(|t| {
        let p = PointId(t[0] as u8);
        let q = PointId(t[1] as u8);
        let r = PointId(t[2] as u8);
        gq.line_through(p, q)
            .is_ok_and(|line| gq.line(line).contains(r))
    })
}

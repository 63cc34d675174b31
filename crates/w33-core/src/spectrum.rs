// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Adjacency spectra of strongly regular graphs, three ways.
//!
//! The eigenvalues of an SRG are determined by its parameters alone, so the
//! primary path here is exact integer arithmetic: restricted eigenvalues
//! r > s are the roots of `x² − (λ−μ)x − (k−μ)`, with multiplicities fixed by
//! the trace conditions. A floating-point eigendecomposition and two integer
//! matrix identities cross-check the same numbers from the actual adjacency
//! matrix, which is how the exploratory scripts sanity-checked their graphs.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, SrgParams};

/// Exact spectrum of a strongly regular graph with integer eigenvalues:
/// degree k once, r with multiplicity `mult_r`, s with multiplicity `mult_s`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrgSpectrum {
    pub k: i64,
    pub r: i64,
    pub s: i64,
    pub mult_r: usize,
    pub mult_s: usize,
}

impl SrgSpectrum {
    /// Trace and dimension conditions every spectrum must satisfy.
    pub fn is_consistent(&self, params: SrgParams) -> bool {
        let n = params.n as i64;
        1 + self.mult_r as i64 + self.mult_s as i64 == n
            && self.k + self.r * self.mult_r as i64 + self.s * self.mult_s as i64 == 0
    }
}

fn integer_sqrt(value: i64) -> Option<i64> {
    if value < 0 {
        return None;
    }
    let root = (value as f64).sqrt().round() as i64;
    for candidate in root.saturating_sub(1)..=root + 1 {
        if candidate * candidate == value {
            return Some(candidate);
        }
    }
    None
}

/// Derives the exact spectrum from SRG parameters. Returns `None` in the
/// conference-graph case (irrational eigenvalues) or when the multiplicity
/// formulas fail to produce nonnegative integers.
pub fn exact_spectrum(params: SrgParams) -> Option<SrgSpectrum> {
    let n = params.n as i64;
    let k = params.k as i64;
    let lambda = params.lambda as i64;
    let mu = params.mu as i64;

    let diff = lambda - mu;
    let disc = diff * diff + 4 * (k - mu);
    let d = integer_sqrt(disc)?;
    if d == 0 {
        return None;
    }
    let r = (diff + d) / 2;
    let s = (diff - d) / 2;
    if (diff + d) % 2 != 0 {
        return None;
    }

    // f = ((n−1) − t)/2, g = ((n−1) + t)/2 with t = (2k + (n−1)(λ−μ))/d.
    let numerator = 2 * k + (n - 1) * diff;
    if numerator % d != 0 {
        return None;
    }
    let t = numerator / d;
    if ((n - 1) - t) % 2 != 0 {
        return None;
    }
    let f = ((n - 1) - t) / 2;
    let g = ((n - 1) + t) / 2;
    if f < 0 || g < 0 {
        return None;
    }

    Some(SrgSpectrum {
        k,
        r,
        s,
        mult_r: f as usize,
        mult_s: g as usize,
    })
}

/// Eigenvalues of the adjacency matrix in ascending order, via nalgebra's
/// symmetric solver.
pub fn numeric_spectrum(graph: &Graph) -> Vec<f64> {
    let n = graph.order();
    let m = DMatrix::<f64>::from_fn(n, n, |i, j| {
        if graph.adjacent(i, j) {
            1.0
        } else {
            0.0
        }
    });
    let eig = SymmetricEigen::new(m);
    let mut values: Vec<f64> = eig.eigenvalues.iter().copied().collect();
    values.sort_by(|a, b| a.partial_cmp(b).expect("adjacency eigenvalues are finite"));
    values
}

/// Groups a sorted eigenvalue list into (value, multiplicity) clusters.
pub fn cluster_eigenvalues(sorted: &[f64], tolerance: f64) -> Vec<(f64, usize)> {
    let mut clusters: Vec<(f64, usize)> = Vec::new();
    for &value in sorted {
        match clusters.last_mut() {
            Some((repr, count)) if (value - *repr).abs() <= tolerance => {
                // Running mean keeps the representative centred.
                *repr = (*repr * *count as f64 + value) / (*count as f64 + 1.0);
                *count += 1;
            }
            _ => clusters.push((value, 1)),
        }
    }
    clusters
}

/// Checks `A² = k·I + λ·A + μ·(J − I − A)` over the integers.
pub fn quadratic_identity_holds(graph: &Graph, params: SrgParams) -> bool {
    let n = graph.order();
    let a = graph.adjacency_matrix();
    let eye = Array2::<i64>::eye(n);
    let ones = Array2::<i64>::ones((n, n));
    let lhs = a.dot(&a);
    let rhs = params.k as i64 * &eye
        + params.lambda as i64 * &a
        + params.mu as i64 * &(&ones - &eye - &a);
    lhs == rhs
}

/// Checks the rank-one identity `(A − r·I)(A − s·I) = μ·J`.
pub fn minimal_polynomial_identity_holds(graph: &Graph, spectrum: SrgSpectrum, mu: u32) -> bool {
    let n = graph.order();
    let a = graph.adjacency_matrix();
    let eye = Array2::<i64>::eye(n);
    let lhs = (&a - &(spectrum.r * &eye)).dot(&(&a - &(spectrum.s * &eye)));
    let rhs = mu as i64 * Array2::<i64>::ones((n, n));
    lhs == rhs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symplectic::Quadrangle;
    use approx::assert_abs_diff_eq;

    fn w33_graph() -> Graph {
        Graph::collinearity(&Quadrangle::build())
    }

    #[test]
    fn exact_spectrum_of_w33() {
        let params = SrgParams {
            n: 40,
            k: 12,
            lambda: 2,
            mu: 4,
        };
        let spec = exact_spectrum(params).expect("integer spectrum");
        assert_eq!(
            spec,
            SrgSpectrum {
                k: 12,
                r: 2,
                s: -4,
                mult_r: 24,
                mult_s: 15
            }
        );
        assert!(spec.is_consistent(params));
    }

    #[test]
    fn conference_parameters_yield_no_integer_spectrum() {
        // The pentagon: eigenvalues (−1 ± √5)/2 are irrational.
        let pentagon = SrgParams {
            n: 5,
            k: 2,
            lambda: 0,
            mu: 1,
        };
        assert_eq!(exact_spectrum(pentagon), None);
    }

    #[test]
    fn numeric_spectrum_clusters_to_the_exact_one() {
        let g = w33_graph();
        let params = g.srg_params().unwrap();
        let exact = exact_spectrum(params).unwrap();

        let values = numeric_spectrum(&g);
        assert_eq!(values.len(), 40);
        let clusters = cluster_eigenvalues(&values, 1e-6);
        assert_eq!(clusters.len(), 3);

        let (s_val, s_mult) = clusters[0];
        let (r_val, r_mult) = clusters[1];
        let (k_val, k_mult) = clusters[2];
        assert_abs_diff_eq!(s_val, exact.s as f64, epsilon = 1e-8);
        assert_abs_diff_eq!(r_val, exact.r as f64, epsilon = 1e-8);
        assert_abs_diff_eq!(k_val, exact.k as f64, epsilon = 1e-8);
        assert_eq!(s_mult, exact.mult_s);
        assert_eq!(r_mult, exact.mult_r);
        assert_eq!(k_mult, 1);
    }

    #[test]
    fn integer_identities_hold_for_w33() {
        let g = w33_graph();
        let params = g.srg_params().unwrap();
        let spec = exact_spectrum(params).unwrap();
        assert!(quadratic_identity_holds(&g, params));
        assert!(minimal_polynomial_identity_holds(&g, spec, params.mu));
    }

    #[test]
    fn cluster_merges_adjacent_values() {
        let sorted = [1.0, 1.0 + 1e-9, 2.0];
        let clusters = cluster_eigenvalues(&sorted, 1e-6);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].1, 2);
        assert_eq!(clusters[1].1, 1);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Eigenbases of line operators and mutually unbiased base families.
//!
//! The nine displacement operators of a totally isotropic line commute
//! literally (their commutation phase is ω⁰), so they share an orthonormal
//! eigenbasis of C⁹. That basis is recovered from the character projectors
//! P_χ = (1/9) Σ_{a,b} ω^{−(χ₁a + χ₂b)} UᵃVᵇ over the span pair (U, V) of
//! the line; each P_χ is rank one and its dominant column is the eigenstate.
//!
//! Two line bases interact in exactly two ways, mirroring the geometry:
//! disjoint lines give mutually unbiased bases (all 81 overlaps have
//! |⟨e|f⟩|² = 1/9), while lines meeting in a point split 54 orthogonal pairs
//! against 27 pairs at 1/3. A spread therefore hands over a complete family
//! of ten mutually unbiased bases of C⁹.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use tracing::{debug, info};

use w33_core::spreads::Spread;
use w33_core::symplectic::{LineId, Quadrangle};

use crate::weyl::{displacement, MonomialOp, PhaseExp, DIM};
use crate::{MubError, Result};

/// |⟨e|f⟩|² between states of two mutually unbiased bases of C⁹.
const UNBIASED_OVERLAP: f64 = 1.0 / 9.0;

/// Column norms below this mean a projector lost its rank-one column, which
/// the exact phase algebra rules out.
const DEGENERACY_FLOOR: f64 = 1e-6;

/// The joint eigenbasis of the displacement operators of one line, stored as
/// the columns of a 9×9 complex matrix.
#[derive(Clone, Debug)]
pub struct LineBasis {
    line: LineId,
    vectors: DMatrix<Complex64>,
}

impl LineBasis {
    /// Materialises the eigenbasis of `line` via its character projectors.
    ///
    /// Column 3χ₁ + χ₂ carries the state with D(v)-eigenvalue ω^{χ₁} and
    /// D(w)-eigenvalue ω^{χ₂}, where (v, w) is the stored span of the line.
    /// The global phase of each state is fixed deterministically by rotating
    /// its largest-modulus entry onto the positive real axis.
    pub fn build(gq: &Quadrangle, line: LineId) -> Result<LineBasis> {
        let (v, w) = gq.line(line).span();
        let u_op = displacement(v);
        let w_op = displacement(w);
        let u_pows = [MonomialOp::identity(), u_op.clone(), u_op.mul(&u_op)];
        let w_pows = [MonomialOp::identity(), w_op.clone(), w_op.mul(&w_op)];

        let mut vectors = DMatrix::<Complex64>::zeros(DIM, DIM);
        for chi1 in 0..3u8 {
            for chi2 in 0..3u8 {
                let mut projector = DMatrix::<Complex64>::zeros(DIM, DIM);
                for a in 0..3u8 {
                    for b in 0..3u8 {
                        let term = u_pows[a as usize].mul(&w_pows[b as usize]);
                        let phase = -PhaseExp::new(chi1 * a + chi2 * b);
                        projector += term.scaled(phase).to_matrix();
                    }
                }
                projector.unscale_mut(DIM as f64);

                // P = ψψ†, so its strongest column is ψ up to scale.
                let mut best = 0usize;
                let mut best_norm = 0.0f64;
                for j in 0..DIM {
                    let n = projector.column(j).norm();
                    if n > best_norm {
                        best_norm = n;
                        best = j;
                    }
                }
                if best_norm < DEGENERACY_FLOOR {
                    return Err(MubError::DegenerateProjector { line, chi1, chi2 });
                }
                let mut state: DVector<Complex64> = projector.column(best).into_owned();
                state.unscale_mut(best_norm);

                let lead = state
                    .iter()
                    .enumerate()
                    .max_by(|(_, x), (_, y)| x.norm_sqr().total_cmp(&y.norm_sqr()))
                    .map(|(i, _)| i)
                    .expect("a normalised state has a largest entry");
                let rotation = state[lead].conj() / state[lead].norm();
                state *= rotation;

                vectors.set_column((3 * chi1 + chi2) as usize, &state);
            }
        }
        debug!(target: "w33::mub", line = line.index(), "materialised line eigenbasis");
        Ok(LineBasis { line, vectors })
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    /// The 9×9 matrix whose columns are the basis states.
    pub fn vectors(&self) -> &DMatrix<Complex64> {
        &self.vectors
    }

    /// An owned copy of the k-th basis state.
    pub fn state(&self, k: usize) -> DVector<Complex64> {
        self.vectors.column(k).into_owned()
    }

    /// Largest entry of |B†B − I|, zero for a perfect orthonormal basis.
    pub fn orthonormality_defect(&self) -> f64 {
        let gram = self.vectors.adjoint() * &self.vectors;
        let mut worst = 0.0f64;
        for i in 0..DIM {
            for j in 0..DIM {
                let expected = if i == j { 1.0 } else { 0.0 };
                worst = worst.max((gram[(i, j)] - Complex64::new(expected, 0.0)).norm());
            }
        }
        worst
    }

    pub fn is_orthonormal(&self, tol: f64) -> bool {
        self.orthonormality_defect() <= tol
    }

    /// Largest residual ‖Dψ − ⟨ψ|D|ψ⟩ψ‖ over the four point operators of the
    /// line and the nine states. Zero means every column really is a joint
    /// eigenvector.
    pub fn joint_eigenvector_defect(&self, gq: &Quadrangle) -> f64 {
        let mut worst = 0.0f64;
        for p in gq.line(self.line).points() {
            let op = displacement(gq.points().vector(p)).to_matrix();
            for k in 0..DIM {
                let psi = self.state(k);
                let image = &op * &psi;
                let eigenvalue = psi.dotc(&image);
                worst = worst.max((image - psi * eigenvalue).norm());
            }
        }
        worst
    }
}

/// The inner product ⟨aᵢ|bⱼ⟩ between two basis states.
pub fn overlap(a: &LineBasis, b: &LineBasis, i: usize, j: usize) -> Complex64 {
    a.vectors.column(i).dotc(&b.vectors.column(j))
}

/// Census of the 81 squared overlaps between two bases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AngleProfile {
    /// Pairs with |⟨e|f⟩|² ≈ 0.
    pub orthogonal: usize,
    /// Pairs at the unbiased value 1/9.
    pub unbiased: usize,
    /// Pairs at 1/3, the signature of bases whose lines share a point.
    pub third: usize,
    /// Anything else; nonzero only when the bases are broken.
    pub other: usize,
}

impl AngleProfile {
    pub fn total(&self) -> usize {
        self.orthogonal + self.unbiased + self.third + self.other
    }
}

/// Classifies all 81 squared overlaps between two line bases.
pub fn angle_profile(a: &LineBasis, b: &LineBasis, tol: f64) -> AngleProfile {
    let mut profile = AngleProfile::default();
    for i in 0..DIM {
        for j in 0..DIM {
            let p = overlap(a, b, i, j).norm_sqr();
            if p <= tol {
                profile.orthogonal += 1;
            } else if (p - UNBIASED_OVERLAP).abs() <= tol {
                profile.unbiased += 1;
            } else if (p - 1.0 / 3.0).abs() <= tol {
                profile.third += 1;
            } else {
                profile.other += 1;
            }
        }
    }
    profile
}

/// Worst deviation of |⟨e|f⟩|² from 1/9 over all 81 state pairs.
pub fn max_unbiased_deviation(a: &LineBasis, b: &LineBasis) -> f64 {
    let mut worst = 0.0f64;
    for i in 0..DIM {
        for j in 0..DIM {
            let p = overlap(a, b, i, j).norm_sqr();
            worst = worst.max((p - UNBIASED_OVERLAP).abs());
        }
    }
    worst
}

/// Whether every squared overlap sits within `tol` of 1/9.
pub fn are_unbiased(a: &LineBasis, b: &LineBasis, tol: f64) -> bool {
    max_unbiased_deviation(a, b) <= tol
}

/// Builds the ten eigenbases of a spread's lines. Since the lines are
/// pairwise disjoint, the result is a complete family of ten mutually
/// unbiased bases of C⁹.
pub fn spread_bases(gq: &Quadrangle, spread: &Spread) -> Result<Vec<LineBasis>> {
    let bases = spread
        .lines()
        .iter()
        .map(|&line| LineBasis::build(gq, line))
        .collect::<Result<Vec<_>>>()?;
    info!(
        target: "w33::mub",
        bases = bases.len(),
        "materialised spread eigenbases"
    );
    Ok(bases)
}

/// Worst unbiasedness deviation across all pairs of a basis family.
pub fn worst_spread_deviation(bases: &[LineBasis]) -> f64 {
    let mut worst = 0.0f64;
    for (i, a) in bases.iter().enumerate() {
        for b in bases.iter().skip(i + 1) {
            worst = worst.max(max_unbiased_deviation(a, b));
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::abs_diff_eq;
    use w33_core::symplectic::LINE_COUNT;

    const TOL: f64 = 1e-9;

    #[test]
    fn line_bases_are_orthonormal_joint_eigenbases() {
        let gq = Quadrangle::build();
        for index in [0u8, 7, 23, 39] {
            let basis = LineBasis::build(&gq, LineId(index)).expect("basis builds");
            assert!(
                abs_diff_eq!(basis.orthonormality_defect(), 0.0, epsilon = TOL),
                "line {index}"
            );
            assert!(
                abs_diff_eq!(basis.joint_eigenvector_defect(&gq), 0.0, epsilon = TOL),
                "line {index}"
            );
        }
    }

    #[test]
    fn meeting_lines_split_into_orthogonal_and_one_third() {
        let gq = Quadrangle::build();
        let p = w33_core::point::PointId(0);
        let [l0, l1, _, _] = gq.lines_through(p);
        let a = LineBasis::build(&gq, l0).expect("basis builds");
        let b = LineBasis::build(&gq, l1).expect("basis builds");
        let profile = angle_profile(&a, &b, TOL);
        assert_eq!(
            profile,
            AngleProfile {
                orthogonal: 54,
                unbiased: 0,
                third: 27,
                other: 0
            }
        );
    }

    #[test]
    fn disjoint_lines_are_unbiased() {
        let gq = Quadrangle::build();
        let first = &gq.lines()[0];
        let partner = gq
            .lines()
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, other)| !other.meets(first))
            .map(|(index, _)| LineId(index as u8))
            .expect("every line has a disjoint partner");
        let a = LineBasis::build(&gq, LineId(0)).expect("basis builds");
        let b = LineBasis::build(&gq, partner).expect("basis builds");
        assert!(are_unbiased(&a, &b, TOL));
        let profile = angle_profile(&a, &b, TOL);
        assert_eq!(profile.unbiased, DIM * DIM);
    }

    #[test]
    fn every_line_basis_builds() {
        let gq = Quadrangle::build();
        for index in 0..gq.lines().len() {
            let id = LineId(index as u8);
            let basis = LineBasis::build(&gq, id).expect("basis builds");
            assert_eq!(basis.line(), id);
            assert!(basis.is_orthonormal(TOL));
        }
        assert_eq!(gq.lines().len(), LINE_COUNT);
    }
}

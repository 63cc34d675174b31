// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Displacement operators on C³ ⊗ C³ with exact phase bookkeeping.
//!
//! A vector (a, b, c, d) over GF(3) labels the operator
//! D = XᵃZᵇ ⊗ XᶜZᵈ, where X is the cyclic shift and Z the ω-phase gate on a
//! single qutrit. Every such operator is a monomial matrix: one nonzero entry
//! per column, and that entry is a power of ω = e^{2πi/3}. [`MonomialOp`]
//! keeps the permutation and the ω exponents as integers, so products,
//! adjoints, commutation phases and traces never touch floating point. The
//! weave into the geometry is the commutation rule
//! D(u)·D(v) = ω^{⟨v,u⟩}·D(v)·D(u) with ⟨·,·⟩ the symplectic form, which
//! makes "commutes" literally the same relation as "perpendicular".

use nalgebra::DMatrix;
use num_complex::Complex64;
use tracing::debug;

use w33_core::gf3::GfVec;
use w33_core::graph::Graph;
use w33_core::symplectic::{form, Quadrangle};

/// Dimension of the two-qutrit space.
pub const DIM: usize = 9;

/// The primitive cube root of unity e^{2πi/3} = −1/2 + i·√3/2.
pub fn omega() -> Complex64 {
    Complex64::new(-0.5, 3f64.sqrt() / 2.0)
}

/// An exponent of ω, reduced mod 3.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhaseExp(u8);

impl PhaseExp {
    pub const ZERO: PhaseExp = PhaseExp(0);

    #[inline]
    pub const fn new(value: u8) -> Self {
        PhaseExp(value % 3)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Materialises ω^exponent.
    pub fn to_complex(self) -> Complex64 {
        match self.0 {
            0 => Complex64::new(1.0, 0.0),
            1 => omega(),
            _ => omega().conj(),
        }
    }
}

impl core::ops::Add for PhaseExp {
    type Output = PhaseExp;
    #[inline]
    fn add(self, rhs: PhaseExp) -> PhaseExp {
        PhaseExp((self.0 + rhs.0) % 3)
    }
}

impl core::ops::Sub for PhaseExp {
    type Output = PhaseExp;
    #[inline]
    fn sub(self, rhs: PhaseExp) -> PhaseExp {
        PhaseExp((3 + self.0 - rhs.0) % 3)
    }
}

impl core::ops::Neg for PhaseExp {
    type Output = PhaseExp;
    #[inline]
    fn neg(self) -> PhaseExp {
        PhaseExp((3 - self.0) % 3)
    }
}

/// An integer element c₀ + c₁ω + c₂ω² of the Eisenstein lattice.
///
/// Traces of monomial operators land here, which keeps the headline
/// orthogonality checks exact: because 1 + ω + ω² = 0, such a combination
/// vanishes precisely when the three coefficients are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Eisenstein {
    counts: [i64; 3],
}

impl Eisenstein {
    pub const ZERO: Eisenstein = Eisenstein { counts: [0; 3] };

    /// Adds a single unit ω^phase.
    #[inline]
    pub fn add_unit(&mut self, phase: PhaseExp) {
        self.counts[phase.value() as usize] += 1;
    }

    /// Coefficients of (1, ω, ω²).
    #[inline]
    pub const fn counts(self) -> [i64; 3] {
        self.counts
    }

    /// Exact zero test using 1 + ω + ω² = 0.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.counts[0] == self.counts[1] && self.counts[1] == self.counts[2]
    }

    pub fn to_complex(self) -> Complex64 {
        Complex64::new(self.counts[0] as f64, 0.0)
            + omega() * self.counts[1] as f64
            + omega().conj() * self.counts[2] as f64
    }
}

impl core::ops::Add for Eisenstein {
    type Output = Eisenstein;
    fn add(self, rhs: Eisenstein) -> Eisenstein {
        Eisenstein {
            counts: [
                self.counts[0] + rhs.counts[0],
                self.counts[1] + rhs.counts[1],
                self.counts[2] + rhs.counts[2],
            ],
        }
    }
}

/// A 9×9 monomial matrix with ω-power entries.
///
/// Column `j` has its single nonzero entry ω^{phase\[j\]} in row `perm[j]`,
/// i.e. the operator acts as |j⟩ ↦ ω^{phase\[j\]} |perm\[j\]⟩.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonomialOp {
    perm: [usize; DIM],
    phase: [PhaseExp; DIM],
}

impl MonomialOp {
    pub fn identity() -> MonomialOp {
        let mut perm = [0usize; DIM];
        for (j, slot) in perm.iter_mut().enumerate() {
            *slot = j;
        }
        MonomialOp {
            perm,
            phase: [PhaseExp::ZERO; DIM],
        }
    }

    /// Operator composition `self ∘ rhs` (apply `rhs` first).
    pub fn mul(&self, rhs: &MonomialOp) -> MonomialOp {
        let mut perm = [0usize; DIM];
        let mut phase = [PhaseExp::ZERO; DIM];
        for j in 0..DIM {
            let mid = rhs.perm[j];
            perm[j] = self.perm[mid];
            phase[j] = rhs.phase[j] + self.phase[mid];
        }
        MonomialOp { perm, phase }
    }

    /// Conjugate transpose. For a monomial unitary this is also the inverse.
    pub fn adjoint(&self) -> MonomialOp {
        let mut perm = [0usize; DIM];
        let mut phase = [PhaseExp::ZERO; DIM];
        for j in 0..DIM {
            perm[self.perm[j]] = j;
            phase[self.perm[j]] = -self.phase[j];
        }
        MonomialOp { perm, phase }
    }

    pub fn pow(&self, exp: u32) -> MonomialOp {
        let mut out = MonomialOp::identity();
        for _ in 0..exp {
            out = out.mul(self);
        }
        out
    }

    /// Multiplies the whole operator by the scalar ω^extra.
    pub fn scaled(&self, extra: PhaseExp) -> MonomialOp {
        let mut out = self.clone();
        for p in out.phase.iter_mut() {
            *p = *p + extra;
        }
        out
    }

    pub fn is_identity(&self) -> bool {
        *self == MonomialOp::identity()
    }

    /// Exact trace: diagonal entries accumulated as an Eisenstein integer.
    pub fn trace(&self) -> Eisenstein {
        let mut tr = Eisenstein::ZERO;
        for j in 0..DIM {
            if self.perm[j] == j {
                tr.add_unit(self.phase[j]);
            }
        }
        tr
    }

    /// Hilbert–Schmidt pairing tr(self† · other), unnormalised.
    pub fn hs_inner(&self, other: &MonomialOp) -> Eisenstein {
        self.adjoint().mul(other).trace()
    }

    /// If `self` = ω^c · `other`, returns `c`.
    pub fn proportional_phase(&self, other: &MonomialOp) -> Option<PhaseExp> {
        if self.perm != other.perm {
            return None;
        }
        let shift = self.phase[0] - other.phase[0];
        for j in 1..DIM {
            if self.phase[j] - other.phase[j] != shift {
                return None;
            }
        }
        Some(shift)
    }

    /// Materialises the dense complex matrix. Only the eigenbasis extraction
    /// downstream needs this; everything algebraic stays on the exact side.
    pub fn to_matrix(&self) -> DMatrix<Complex64> {
        DMatrix::from_fn(DIM, DIM, |i, j| {
            if self.perm[j] == i {
                self.phase[j].to_complex()
            } else {
                Complex64::new(0.0, 0.0)
            }
        })
    }
}

/// The displacement operator XᵃZᵇ ⊗ XᶜZᵈ for the coordinate vector
/// (a, b, c, d). Basis states are indexed |j₁j₂⟩ ↦ 3j₁ + j₂.
pub fn displacement(v: GfVec) -> MonomialOp {
    let [a, b, c, d] = v.coords();
    let mut perm = [0usize; DIM];
    let mut phase = [PhaseExp::ZERO; DIM];
    for j1 in 0..3u8 {
        for j2 in 0..3u8 {
            let col = (3 * j1 + j2) as usize;
            perm[col] = (3 * ((j1 + a) % 3) + (j2 + c) % 3) as usize;
            phase[col] = PhaseExp::new(b * j1 + d * j2);
        }
    }
    MonomialOp { perm, phase }
}

/// The phase c in D(u)·D(v) = ω^c · D(v)·D(u). Equals the symplectic form
/// ⟨v, u⟩, and the test suite pins that down for every pair.
pub fn commutation_phase(u: GfVec, v: GfVec) -> PhaseExp {
    let du = displacement(u);
    let dv = displacement(v);
    du.mul(&dv)
        .proportional_phase(&dv.mul(&du))
        .expect("displacement products differ by a scalar phase only")
}

/// Whether D(u) and D(v) commute on the nose.
pub fn commutes(u: GfVec, v: GfVec) -> bool {
    commutation_phase(u, v).is_zero()
}

/// The graph on the 40 points with p ~ q when their displacement operators
/// commute. By the commutation rule this reproduces the collinearity graph,
/// giving SRG(40, 12, 2, 4) a second, operator-algebraic construction.
pub fn commutation_graph(gq: &Quadrangle) -> Graph {
    let points = gq.points();
    let mut graph = Graph::new(points.len());
    for (p, vp) in points.iter() {
        for (q, vq) in points.iter() {
            if p.index() < q.index() && commutes(vp, vq) {
                graph.add_edge(p.index(), q.index());
            }
        }
    }
    debug!(
        target: "w33::mub",
        edges = graph.edge_count(),
        "built commutation graph"
    );
    graph
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Weyl–Heisenberg displacement operators on two qutrits and the mutually
//! unbiased bases attached to the lines of W(3,3).
//!
//! The crate has two layers. [`weyl`] is exact: displacement operators are
//! monomial matrices whose entries are integer powers of ω = e^{2πi/3}, so
//! composition, commutation phases and traces are all integer arithmetic.
//! [`mub`] materialises complex eigenbases from those operators and checks
//! unbiasedness numerically; floats appear only there.

use thiserror::Error;

use w33_core::symplectic::LineId;

pub mod mub;
pub mod weyl;

pub use mub::{
    angle_profile, are_unbiased, max_unbiased_deviation, overlap, spread_bases,
    worst_spread_deviation, AngleProfile, LineBasis,
};
pub use weyl::{
    commutation_graph, commutation_phase, commutes, displacement, Eisenstein, MonomialOp,
    PhaseExp, DIM,
};

#[derive(Debug, Error)]
pub enum MubError {
    /// A character projector that should be rank one came out numerically
    /// zero. With exact phases this cannot happen; seeing it means the
    /// operator algebra upstream is broken.
    #[error("projector for character ({chi1}, {chi2}) on line {line:?} is degenerate")]
    DegenerateProjector { line: LineId, chi1: u8, chi2: u8 },

    #[error(transparent)]
    Geometry(#[from] w33_core::GeometryError),
}

pub type Result<T> = std::result::Result<T, MubError>;

// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Core finite geometry of the W33 configuration.
//!
//! The crate builds the symplectic polar space W(3,3) over GF(3) — 40 points,
//! 40 totally isotropic lines — and everything the exploration scripts derive
//! from it: the strongly regular collinearity graph SRG(40,12,2,4) and its
//! line graph, exact and numeric adjacency spectra, the triple census,
//! maximal cliques and maximum cocliques, line spreads, and the action of
//! PSp(4,3) / PGSp(4,3) on all of the above. The [`summary`] module bundles
//! the invariants into a single serialisable artifact.

pub mod cliques;
pub mod error;
pub mod gf3;
pub mod graph;
pub mod group;
pub mod point;
pub mod spectrum;
pub mod spreads;
pub mod summary;
pub mod symplectic;
pub mod triangles;

pub use error::{GeometryError, Result};
pub use gf3::{Gf3, GfVec};
pub use graph::{Graph, SrgParams};
pub use point::{PointId, PointSet, POINT_COUNT};
pub use summary::W33Summary;
pub use symplectic::{Line, LineId, Quadrangle, LINE_COUNT, LINE_SIZE};

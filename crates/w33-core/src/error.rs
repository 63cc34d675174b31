// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Failure modes of the geometric constructions. The builds themselves are
/// closed-form and cannot fail; errors arise from caller-supplied vectors,
/// pairs, and limits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("the zero vector does not define a projective point")]
    ZeroVector,
    #[error("points {0} and {1} are not perpendicular, no line joins them")]
    NotPerpendicular(u8, u8),
    #[error("point ids must be distinct")]
    CoincidentPoints,
    #[error("line set is not a spread: {0}")]
    NotASpread(&'static str),
    #[error("group closure exceeded the {limit} element limit")]
    ClosureOverflow { limit: usize },
}

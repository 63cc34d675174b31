// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! The 40 points of PG(3,3), indexed canonically.
//!
//! Each point is the projective class of a nonzero vector in GF(3)^4,
//! represented by its canonical vector (first nonzero coordinate 1) and
//! addressed by a stable [`PointId`] in lexicographic order. Every artifact
//! and every enumeration downstream keys off this ordering, so it must never
//! depend on map iteration order or other incidental state.

use crate::error::{GeometryError, Result};
use crate::gf3::GfVec;

/// Number of projective points of PG(3,3): (3^4 - 1) / (3 - 1).
pub const POINT_COUNT: usize = 40;

/// Index of a point in the canonical lexicographic ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u8);

impl PointId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The canonical point list plus an O(1) reverse lookup over all 81 vector
/// codes.
#[derive(Clone, Debug)]
pub struct PointSet {
    points: Vec<GfVec>,
    // code (0..81) -> point id, or u8::MAX for the zero vector.
    lookup: [u8; 81],
}

impl PointSet {
    /// Enumerates the canonical representatives in lexicographic order and
    /// fills the reverse lookup for both members of each scalar class.
    pub fn build() -> PointSet {
        let mut points = Vec::with_capacity(POINT_COUNT);
        let mut lookup = [u8::MAX; 81];
        for v in GfVec::all() {
            if v.is_canonical() {
                let id = points.len() as u8;
                points.push(v);
                lookup[v.code() as usize] = id;
                lookup[v.scale(crate::gf3::Gf3::TWO).code() as usize] = id;
            }
        }
        debug_assert_eq!(points.len(), POINT_COUNT);
        PointSet { points, lookup }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The canonical vector of a point.
    #[inline]
    pub fn vector(&self, id: PointId) -> GfVec {
        self.points[id.index()]
    }

    /// Resolves any nonzero vector to the id of its projective class.
    pub fn id_of(&self, v: GfVec) -> Result<PointId> {
        if v.is_zero() {
            return Err(GeometryError::ZeroVector);
        }
        Ok(PointId(self.lookup[v.code() as usize]))
    }

    /// Iterates ids and canonical vectors in order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, GfVec)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, v)| (PointId(i as u8), *v))
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Line spreads of W(3,3).
//!
//! A spread is a set of ten pairwise disjoint lines partitioning the 40
//! points. Under the duality with Q(4,3) the spreads correspond to ovoids,
//! all of which are elliptic hyperplane sections, so W(3,3) carries exactly
//! q²(q²−1)/2 = 36 of them. The enumeration backtracks on the lowest
//! uncovered point, which both prunes hard (only the four lines through that
//! point can extend a partial spread) and yields each spread exactly once in
//! a stable order.

use tracing::info;

use crate::error::{GeometryError, Result};
use crate::point::{PointId, POINT_COUNT};
use crate::symplectic::{LineId, Quadrangle, LINE_COUNT};

/// Lines per spread: 40 points / 4 points per line.
pub const SPREAD_SIZE: usize = 10;

/// Ten pairwise disjoint lines covering the point set, sorted by line id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Spread {
    lines: [LineId; SPREAD_SIZE],
}

impl Spread {
    /// Validates a candidate line set and returns its canonical sorted form.
    pub fn validate(gq: &Quadrangle, lines: &[LineId]) -> Result<Spread> {
        if lines.len() != SPREAD_SIZE {
            return Err(GeometryError::NotASpread("a spread holds exactly 10 lines"));
        }
        let mut covered = 0u64;
        for id in lines {
            if id.index() >= LINE_COUNT {
                return Err(GeometryError::NotASpread("line id out of range"));
            }
            let mask = gq.line(*id).mask();
            if covered & mask != 0 {
                return Err(GeometryError::NotASpread(
                    "lines are not pairwise disjoint",
                ));
            }
            covered |= mask;
        }
        // Ten disjoint 4-point lines cover all 40 points by counting.
        debug_assert_eq!(covered.count_ones() as usize, POINT_COUNT);
        let mut sorted: [LineId; SPREAD_SIZE] = lines
            .try_into()
            .expect("length checked above");
        sorted.sort_unstable();
        Ok(Spread { lines: sorted })
    }

    #[inline]
    pub fn lines(&self) -> [LineId; SPREAD_SIZE] {
        self.lines
    }

    #[inline]
    pub fn contains(&self, line: LineId) -> bool {
        self.lines.contains(&line)
    }

    /// Whether the spread covers every point exactly once.
    pub fn covers(&self, gq: &Quadrangle) -> bool {
        let mut covered = 0u64;
        for id in self.lines {
            let mask = gq.line(id).mask();
            if covered & mask != 0 {
                return false;
            }
            covered |= mask;
        }
        covered.count_ones() as usize == POINT_COUNT
    }
}

/// Enumerates every spread by exact-cover backtracking.
pub fn enumerate_spreads(gq: &Quadrangle) -> Vec<Spread> {
    let mut chosen: Vec<LineId> = Vec::with_capacity(SPREAD_SIZE);
    let mut out = Vec::new();
    extend_cover(gq, 0, &mut chosen, &mut out);
    info!(
        target: "w33::spreads",
        count = out.len(),
        "enumerated line spreads"
    );
    out
}

fn extend_cover(gq: &Quadrangle, covered: u64, chosen: &mut Vec<LineId>, out: &mut Vec<Spread>) {
    if chosen.len() == SPREAD_SIZE {
        let mut lines: [LineId; SPREAD_SIZE] =
            chosen.as_slice().try_into().expect("ten lines chosen");
        lines.sort_unstable();
        out.push(Spread { lines });
        return;
    }
    // The first uncovered point must lie on one of the chosen lines' successors.
    let lowest = (!covered).trailing_zeros() as u8;
    for id in gq.lines_through(PointId(lowest)) {
        let mask = gq.line(id).mask();
        if covered & mask == 0 {
            chosen.push(id);
            extend_cover(gq, covered | mask, chosen, out);
            chosen.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_thirty_six_spreads() {
        let gq = Quadrangle::build();
        let spreads = enumerate_spreads(&gq);
        assert_eq!(spreads.len(), 36);
        for spread in &spreads {
            assert!(spread.covers(&gq));
            assert!(spread.lines().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn enumeration_has_no_duplicates() {
        let gq = Quadrangle::build();
        let mut spreads = enumerate_spreads(&gq);
        let before = spreads.len();
        spreads.sort();
        spreads.dedup();
        assert_eq!(spreads.len(), before);
    }

    #[test]
    fn validate_round_trips_enumerated_spreads() {
        let gq = Quadrangle::build();
        for spread in enumerate_spreads(&gq) {
            let rebuilt = Spread::validate(&gq, &spread.lines()).unwrap();
            assert_eq!(rebuilt, spread);
        }
    }

    #[test]
    fn validate_rejects_malformed_inputs() {
        let gq = Quadrangle::build();
        let spread = enumerate_spreads(&gq).remove(0);
        let lines = spread.lines();

        assert!(matches!(
            Spread::validate(&gq, &lines[..9]),
            Err(GeometryError::NotASpread(_))
        ));

        let mut meeting = lines;
        // Replace one line with another through a point it already covers.
        let p = gq.line(meeting[0]).points()[0];
        let replacement = gq
            .lines_through(p)
            .into_iter()
            .find(|id| !spread.contains(*id))
            .expect("three other lines pass through the point");
        meeting[1] = replacement;
        assert!(matches!(
            Spread::validate(&gq, &meeting),
            Err(GeometryError::NotASpread(_))
        ));

        // Ids past the 40 lines must be rejected, not indexed.
        let mut out_of_range = lines;
        out_of_range[9] = LineId(200);
        assert!(matches!(
            Spread::validate(&gq, &out_of_range),
            Err(GeometryError::NotASpread(_))
        ));
        assert!(matches!(
            Spread::validate(&gq, &[LineId(200); SPREAD_SIZE]),
            Err(GeometryError::NotASpread(_))
        ));
    }
}

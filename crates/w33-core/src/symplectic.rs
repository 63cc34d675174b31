// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! The symplectic polar space W(3,3) as an incidence structure.
//!
//! GF(3)^4 carries the alternating form
//! `B(x, y) = x0·y1 − x1·y0 + x2·y3 − x3·y2`. Since B is alternating, every
//! point of PG(3,3) is isotropic, so the polar space keeps all 40 points;
//! its lines are the totally isotropic 2-subspaces, 40 of them, each holding
//! 4 points. Together they form the generalized quadrangle GQ(3,3): every
//! point lies on 4 lines, two perpendicular points lie on exactly one common
//! line, and no triangle of lines exists. All heavier structure (the W33
//! graph, spreads, the automorphism action) is derived from this object.

use ndarray::Array2;
use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::gf3::{Gf3, GfVec};
use crate::point::{PointId, PointSet, POINT_COUNT};

/// Number of totally isotropic lines of W(3,3).
pub const LINE_COUNT: usize = 40;
/// Points per line and lines per point (the GQ(3,3) orders s = t = 3 plus 1).
pub const LINE_SIZE: usize = 4;

/// Evaluates the symplectic form `x0·y1 − x1·y0 + x2·y3 − x3·y2` mod 3.
#[inline]
pub fn form(x: GfVec, y: GfVec) -> Gf3 {
    (x[0] * y[1] - x[1] * y[0]) + (x[2] * y[3] - x[3] * y[2])
}

/// Whether two vectors are perpendicular with respect to the form. Every
/// vector is perpendicular to itself (the form is alternating).
#[inline]
pub fn perp(x: GfVec, y: GfVec) -> bool {
    form(x, y).is_zero()
}

/// Index of a line in the canonical ordering (ascending by the line's two
/// smallest point ids).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u8);

impl LineId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A totally isotropic line: four pairwise perpendicular points.
#[derive(Clone, Debug)]
pub struct Line {
    /// The member points, ascending.
    points: [PointId; LINE_SIZE],
    /// A generating pair of canonical vectors spanning the subspace.
    span: (GfVec, GfVec),
}

impl Line {
    #[inline]
    pub fn points(&self) -> [PointId; LINE_SIZE] {
        self.points
    }

    #[inline]
    pub fn span(&self) -> (GfVec, GfVec) {
        self.span
    }

    #[inline]
    pub fn contains(&self, p: PointId) -> bool {
        self.points.contains(&p)
    }

    /// Bitmask of the member points.
    #[inline]
    pub fn mask(&self) -> u64 {
        self.points.iter().fold(0u64, |m, p| m | 1 << p.index())
    }

    /// Whether this line shares a point with another.
    pub fn meets(&self, other: &Line) -> bool {
        self.points.iter().any(|p| other.contains(*p))
    }
}

/// The four projective points of the span of two independent perpendicular
/// vectors: v, w, v+w, v+2w.
fn span_points(v: GfVec, w: GfVec) -> [GfVec; LINE_SIZE] {
    [
        v.canonical(),
        w.canonical(),
        (v + w).canonical(),
        (v + w.scale(Gf3::TWO)).canonical(),
    ]
}

/// The W(3,3) incidence structure: 40 points, 40 lines, and the lookup
/// tables tying them together.
#[derive(Clone, Debug)]
pub struct Quadrangle {
    points: PointSet,
    lines: Vec<Line>,
    lines_through: Vec<[LineId; 4]>,
    joining: Vec<Option<LineId>>,
}

impl Quadrangle {
    /// Constructs the full quadrangle. Lines are discovered from their two
    /// lexicographically smallest points, which makes the ordering stable
    /// across runs without any sorting pass.
    pub fn build() -> Quadrangle {
        let points = PointSet::build();
        let mut lines: Vec<Line> = Vec::with_capacity(LINE_COUNT);
        let mut joining: Vec<Option<LineId>> = vec![None; POINT_COUNT * POINT_COUNT];

        for (p, v) in points.iter() {
            for (q, w) in points.iter() {
                if q <= p || !perp(v, w) {
                    continue;
                }
                let mut ids = [PointId(0); LINE_SIZE];
                for (slot, pt) in span_points(v, w).iter().enumerate() {
                    ids[slot] = points
                        .id_of(*pt)
                        .expect("span of independent vectors is nonzero");
                }
                ids.sort_unstable();
                // Record the line only at its defining pair; other
                // perpendicular pairs inside it rediscover the same ids.
                if ids[0] == p && ids[1] == q {
                    let id = LineId(lines.len() as u8);
                    for a in 0..LINE_SIZE {
                        for b in 0..LINE_SIZE {
                            if a != b {
                                joining[ids[a].index() * POINT_COUNT + ids[b].index()] = Some(id);
                            }
                        }
                    }
                    lines.push(Line {
                        points: ids,
                        span: (v, w),
                    });
                }
            }
        }
        debug_assert_eq!(lines.len(), LINE_COUNT);

        let mut through: Vec<Vec<LineId>> = vec![Vec::with_capacity(4); POINT_COUNT];
        for (idx, line) in lines.iter().enumerate() {
            for p in line.points {
                through[p.index()].push(LineId(idx as u8));
            }
        }
        let lines_through: Vec<[LineId; 4]> = through
            .into_iter()
            .map(|ids| {
                <[LineId; 4]>::try_from(ids.as_slice())
                    .expect("every point of W(3,3) lies on exactly 4 lines")
            })
            .collect();

        debug!(
            target: "w33::geometry",
            points = points.len(),
            lines = lines.len(),
            "constructed W(3,3) incidence structure"
        );

        Quadrangle {
            points,
            lines,
            lines_through,
            joining,
        }
    }

    #[inline]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.index()]
    }

    /// The four lines incident with a point.
    #[inline]
    pub fn lines_through(&self, p: PointId) -> [LineId; 4] {
        self.lines_through[p.index()]
    }

    /// The unique line joining two distinct perpendicular points.
    pub fn line_through(&self, p: PointId, q: PointId) -> Result<LineId> {
        if p == q {
            return Err(GeometryError::CoincidentPoints);
        }
        self.joining[p.index() * POINT_COUNT + q.index()]
            .ok_or(GeometryError::NotPerpendicular(p.0, q.0))
    }

    /// Point-by-line incidence matrix over the integers.
    pub fn incidence_matrix(&self) -> Array2<i64> {
        let mut m = Array2::<i64>::zeros((POINT_COUNT, LINE_COUNT));
        for (idx, line) in self.lines.iter().enumerate() {
            for p in line.points {
                m[(p.index(), idx)] = 1;
            }
        }
        m
    }
}

/// The standard hyperbolic basis (e1, f1, e2, f2) of the form:
/// B(e1,f1) = B(e2,f2) = 1 and all other pairings vanish.
pub fn standard_basis() -> [GfVec; 4] {
    [
        GfVec::new([1, 0, 0, 0]),
        GfVec::new([0, 1, 0, 0]),
        GfVec::new([0, 0, 1, 0]),
        GfVec::new([0, 0, 0, 1]),
    ]
}

/// Whether an ordered quadruple is a hyperbolic basis for the form.
pub fn is_hyperbolic_basis(basis: &[GfVec; 4]) -> bool {
    let [e1, f1, e2, f2] = *basis;
    form(e1, f1) == Gf3::ONE
        && form(e2, f2) == Gf3::ONE
        && perp(e1, e2)
        && perp(e1, f2)
        && perp(f1, e2)
        && perp(f1, f2)
}

/// Counts all ordered hyperbolic bases by direct enumeration. Sp(4,3) acts
/// simply transitively on them, so the count equals the group order 51840.
pub fn count_hyperbolic_bases() -> usize {
    let nonzero: Vec<GfVec> = GfVec::all().filter(|v| !v.is_zero()).collect();
    let mut count = 0usize;
    for &e1 in &nonzero {
        for &f1 in &nonzero {
            if form(e1, f1) != Gf3::ONE {
                continue;
            }
            for &e2 in &nonzero {
                if !perp(e1, e2) || !perp(f1, e2) {
                    continue;
                }
                for &f2 in &nonzero {
                    if form(e2, f2) == Gf3::ONE && perp(e1, f2) && perp(f1, f2) {
                        count += 1;
                    }
                }
            }
        }
    }
    count
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Arithmetic over GF(3) and length-4 coordinate vectors.
//!
//! Everything downstream (the symplectic form, the point set, the
//! displacement operators) reduces to mod-3 arithmetic on these two types,
//! so they stay deliberately small: a wrapped residue and a fixed `[Gf3; 4]`
//! with componentwise operations and a projective canonical form.

use core::fmt;
use core::ops::{Add, AddAssign, Index, Mul, Neg, Sub};

/// A residue mod 3. The wrapped value is always in `{0, 1, 2}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gf3(u8);

impl Gf3 {
    pub const ZERO: Gf3 = Gf3(0);
    pub const ONE: Gf3 = Gf3(1);
    pub const TWO: Gf3 = Gf3(2);

    /// Reduces an arbitrary byte into the field.
    #[inline]
    pub const fn new(value: u8) -> Self {
        Gf3(value % 3)
    }

    /// Reduces a signed integer into the field.
    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        Gf3(value.rem_euclid(3) as u8)
    }

    /// The canonical representative in `{0, 1, 2}`.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiplicative inverse. In GF(3) every nonzero element is its own
    /// inverse (1·1 = 1, 2·2 = 4 ≡ 1).
    #[inline]
    pub const fn inv(self) -> Option<Gf3> {
        match self.0 {
            0 => None,
            v => Some(Gf3(v)),
        }
    }

    /// Exponentiation by squaring is overkill here; the multiplicative group
    /// has order 2, so only the exponent's parity matters.
    #[inline]
    pub const fn pow(self, exp: u32) -> Gf3 {
        match (self.0, exp) {
            (_, 0) => Gf3(1),
            (0, _) => Gf3(0),
            (1, _) => Gf3(1),
            (2, e) => {
                if e % 2 == 0 {
                    Gf3(1)
                } else {
                    Gf3(2)
                }
            }
            _ => unreachable!(),
        }
    }
}

impl Add for Gf3 {
    type Output = Gf3;
    #[inline]
    fn add(self, rhs: Gf3) -> Gf3 {
        Gf3((self.0 + rhs.0) % 3)
    }
}

impl AddAssign for Gf3 {
    #[inline]
    fn add_assign(&mut self, rhs: Gf3) {
        *self = *self + rhs;
    }
}

impl Sub for Gf3 {
    type Output = Gf3;
    #[inline]
    fn sub(self, rhs: Gf3) -> Gf3 {
        Gf3((3 + self.0 - rhs.0) % 3)
    }
}

impl Mul for Gf3 {
    type Output = Gf3;
    #[inline]
    fn mul(self, rhs: Gf3) -> Gf3 {
        Gf3((self.0 * rhs.0) % 3)
    }
}

impl Neg for Gf3 {
    type Output = Gf3;
    #[inline]
    fn neg(self) -> Gf3 {
        Gf3((3 - self.0) % 3)
    }
}

impl fmt::Display for Gf3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vector in GF(3)^4, the ambient space of the W33 construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GfVec(pub [Gf3; 4]);

impl GfVec {
    pub const ZERO: GfVec = GfVec([Gf3::ZERO; 4]);

    /// Builds a vector from raw residues, reducing each byte mod 3.
    #[inline]
    pub const fn new(coords: [u8; 4]) -> Self {
        GfVec([
            Gf3::new(coords[0]),
            Gf3::new(coords[1]),
            Gf3::new(coords[2]),
            Gf3::new(coords[3]),
        ])
    }

    #[inline]
    pub fn coords(&self) -> [u8; 4] {
        [self.0[0].0, self.0[1].0, self.0[2].0, self.0[3].0]
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.is_zero())
    }

    /// Scales every coordinate by `s`.
    #[inline]
    pub fn scale(&self, s: Gf3) -> GfVec {
        GfVec([self.0[0] * s, self.0[1] * s, self.0[2] * s, self.0[3] * s])
    }

    /// The projective representative: the unique scalar multiple whose first
    /// nonzero coordinate is 1. Zero maps to itself.
    pub fn canonical(&self) -> GfVec {
        for c in self.0 {
            if !c.is_zero() {
                // c.inv() always exists here and equals c itself.
                return self.scale(c);
            }
        }
        *self
    }

    /// Whether this vector already is the projective representative of its
    /// scalar class.
    pub fn is_canonical(&self) -> bool {
        !self.is_zero() && *self == self.canonical()
    }

    /// Iterates over all 81 vectors of GF(3)^4 in lexicographic order.
    pub fn all() -> impl Iterator<Item = GfVec> {
        (0u8..81).map(|code| {
            GfVec::new([
                (code / 27) % 3,
                (code / 9) % 3,
                (code / 3) % 3,
                code % 3,
            ])
        })
    }

    /// Packs the coordinates into a base-3 code in `0..81`, the inverse of
    /// the ordering used by [`GfVec::all`].
    #[inline]
    pub fn code(&self) -> u8 {
        let c = self.coords();
        c[0] * 27 + c[1] * 9 + c[2] * 3 + c[3]
    }
}

impl Add for GfVec {
    type Output = GfVec;
    #[inline]
    fn add(self, rhs: GfVec) -> GfVec {
        GfVec([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
        ])
    }
}

impl Sub for GfVec {
    type Output = GfVec;
    #[inline]
    fn sub(self, rhs: GfVec) -> GfVec {
        GfVec([
            self.0[0] - rhs.0[0],
            self.0[1] - rhs.0[1],
            self.0[2] - rhs.0[2],
            self.0[3] - rhs.0[3],
        ])
    }
}

impl Index<usize> for GfVec {
    type Output = Gf3;
    #[inline]
    fn index(&self, index: usize) -> &Gf3 {
        &self.0[index]
    }
}

impl fmt::Display for GfVec {
    /// Homogeneous-coordinate notation, e.g. `(1:0:2:1)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}:{}:{}:{})",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_tables_hold() {
        for a in 0..3u8 {
            for b in 0..3u8 {
                let x = Gf3::new(a);
                let y = Gf3::new(b);
                assert_eq!((x + y).value(), (a + b) % 3);
                assert_eq!((x * y).value(), (a * b) % 3);
                assert_eq!((x - y).value(), (3 + a - b) % 3);
            }
        }
        assert_eq!((-Gf3::ONE).value(), 2);
        assert_eq!((-Gf3::TWO).value(), 1);
        assert_eq!((-Gf3::ZERO).value(), 0);
    }

    #[test]
    fn every_nonzero_element_is_self_inverse() {
        assert_eq!(Gf3::ZERO.inv(), None);
        assert_eq!(Gf3::ONE.inv(), Some(Gf3::ONE));
        assert_eq!(Gf3::TWO.inv(), Some(Gf3::TWO));
        assert_eq!(Gf3::TWO * Gf3::TWO, Gf3::ONE);
    }

    #[test]
    fn pow_respects_group_order() {
        assert_eq!(Gf3::TWO.pow(0), Gf3::ONE);
        assert_eq!(Gf3::TWO.pow(1), Gf3::TWO);
        assert_eq!(Gf3::TWO.pow(2), Gf3::ONE);
        assert_eq!(Gf3::ZERO.pow(5), Gf3::ZERO);
        assert_eq!(Gf3::ZERO.pow(0), Gf3::ONE);
    }

    #[test]
    fn signed_reduction_wraps_negatives() {
        assert_eq!(Gf3::from_i64(-1), Gf3::TWO);
        assert_eq!(Gf3::from_i64(-3), Gf3::ZERO);
        assert_eq!(Gf3::from_i64(7), Gf3::ONE);
    }

    #[test]
    fn canonical_picks_leading_one() {
        let v = GfVec::new([2, 1, 0, 2]);
        let c = v.canonical();
        assert_eq!(c, GfVec::new([1, 2, 0, 1]));
        assert!(c.is_canonical());
        assert_eq!(v.scale(Gf3::TWO).canonical(), c);

        let tail = GfVec::new([0, 0, 0, 2]);
        assert_eq!(tail.canonical(), GfVec::new([0, 0, 0, 1]));
    }

    #[test]
    fn enumeration_is_lexicographic_and_complete() {
        let all: Vec<GfVec> = GfVec::all().collect();
        assert_eq!(all.len(), 81);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        for (code, v) in all.iter().enumerate() {
            assert_eq!(v.code() as usize, code);
        }
    }

    #[test]
    fn exactly_forty_canonical_classes() {
        let canonical = GfVec::all().filter(GfVec::is_canonical).count();
        assert_eq!(canonical, 40);
    }
}

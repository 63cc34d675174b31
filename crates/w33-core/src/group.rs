// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! The automorphism action of the symplectic group on the 40 points.
//!
//! Symplectic transvections x ↦ x + λ·B(x,v)·v generate Sp(4,3); since the
//! centre ±I acts trivially on projective points, their induced permutations
//! close into PSp(4,3) of order 25920. A scale-2 similitude such as
//! diag(1,2,1,2) falls outside that action and extends it to the full
//! automorphism group PGSp(4,3) of order 51840. Everything here works with
//! the induced point permutations: closure is a breadth-first product sweep
//! guarded by an order limit, and orbits of points, point subsets and spreads
//! come from the same generator walk.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, info};

use crate::error::{GeometryError, Result};
use crate::gf3::{Gf3, GfVec};
use crate::graph::Graph;
use crate::point::{PointId, POINT_COUNT};
use crate::spreads::Spread;
use crate::symplectic::{form, standard_basis, LineId, Quadrangle};

/// Order of PSp(4,3), the transvection-generated point action.
pub const PSP_ORDER: usize = 25920;
/// Order of PGSp(4,3), the extension by the duality similitude.
pub const PGSP_ORDER: usize = 51840;

/// A 4×4 matrix over GF(3) acting on column vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GfMat {
    rows: [[Gf3; 4]; 4],
}

impl GfMat {
    pub fn identity() -> GfMat {
        GfMat::diagonal([1, 1, 1, 1])
    }

    /// Builds a matrix from row arrays of raw residues.
    pub fn from_rows(rows: [[u8; 4]; 4]) -> GfMat {
        let mut out = [[Gf3::ZERO; 4]; 4];
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                out[i][j] = Gf3::new(value);
            }
        }
        GfMat { rows: out }
    }

    pub fn diagonal(entries: [u8; 4]) -> GfMat {
        let mut rows = [[Gf3::ZERO; 4]; 4];
        for (i, &value) in entries.iter().enumerate() {
            rows[i][i] = Gf3::new(value);
        }
        GfMat { rows }
    }

    /// The symplectic transvection x ↦ x + λ·B(x, v)·v.
    pub fn transvection(direction: GfVec, lambda: Gf3) -> GfMat {
        let mut rows = [[Gf3::ZERO; 4]; 4];
        for (j, e) in standard_basis().iter().enumerate() {
            let image = *e + direction.scale(lambda * form(*e, direction));
            for (i, row) in rows.iter_mut().enumerate() {
                row[j] = image[i];
            }
        }
        GfMat { rows }
    }

    /// Matrix–vector product.
    pub fn apply(&self, v: GfVec) -> GfVec {
        let mut out = [Gf3::ZERO; 4];
        for (i, row) in self.rows.iter().enumerate() {
            let mut acc = Gf3::ZERO;
            for (j, &entry) in row.iter().enumerate() {
                acc += entry * v[j];
            }
            out[i] = acc;
        }
        GfVec(out)
    }

    /// Matrix product `self · rhs`.
    pub fn mul(&self, rhs: &GfMat) -> GfMat {
        let mut rows = [[Gf3::ZERO; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                let mut acc = Gf3::ZERO;
                for (k, rhs_row) in rhs.rows.iter().enumerate() {
                    acc += self.rows[i][k] * rhs_row[j];
                }
                rows[i][j] = acc;
            }
        }
        GfMat { rows }
    }

    fn column(&self, j: usize) -> GfVec {
        GfVec([self.rows[0][j], self.rows[1][j], self.rows[2][j], self.rows[3][j]])
    }

    /// The scalar κ with B(Mx, My) = κ·B(x, y) for all x, y, when one exists
    /// and is nonzero.
    pub fn similitude_factor(&self) -> Option<Gf3> {
        let basis = standard_basis();
        let images: Vec<GfVec> = (0..4).map(|j| self.column(j)).collect();
        // B(e0, e1) = 1 pins the candidate factor.
        let kappa = form(images[0], images[1]);
        if kappa.is_zero() {
            return None;
        }
        for i in 0..4 {
            for j in 0..4 {
                if form(images[i], images[j]) != kappa * form(basis[i], basis[j]) {
                    return None;
                }
            }
        }
        Some(kappa)
    }

    /// Whether the matrix preserves the symplectic form exactly.
    pub fn is_symplectic(&self) -> bool {
        self.similitude_factor() == Some(Gf3::ONE)
    }
}

/// A permutation of the 40 points, stored as its image table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointPerm {
    images: [u8; POINT_COUNT],
}

impl PointPerm {
    pub fn identity() -> PointPerm {
        let mut images = [0u8; POINT_COUNT];
        for (i, slot) in images.iter_mut().enumerate() {
            *slot = i as u8;
        }
        PointPerm { images }
    }

    /// The permutation a nonsingular matrix induces on projective points. A
    /// singular matrix sends some point to zero and surfaces as
    /// [`GeometryError::ZeroVector`].
    pub fn from_matrix(gq: &Quadrangle, m: &GfMat) -> Result<PointPerm> {
        let mut images = [0u8; POINT_COUNT];
        let mut hit = [false; POINT_COUNT];
        for (p, v) in gq.points().iter() {
            let image = gq.points().id_of(m.apply(v))?;
            images[p.index()] = image.0;
            hit[image.index()] = true;
        }
        // A matrix that annihilates no point is invertible, hence bijective.
        debug_assert!(hit.iter().all(|&b| b));
        Ok(PointPerm { images })
    }

    #[inline]
    pub fn apply(&self, p: PointId) -> PointId {
        PointId(self.images[p.index()])
    }

    /// Image of a point subset given as a bitmask.
    pub fn image_mask(&self, mask: u64) -> u64 {
        let mut out = 0u64;
        for (i, &img) in self.images.iter().enumerate() {
            if mask >> i & 1 == 1 {
                out |= 1 << img;
            }
        }
        out
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &PointPerm) -> PointPerm {
        let mut images = [0u8; POINT_COUNT];
        for (i, &mid) in self.images.iter().enumerate() {
            images[i] = next.images[mid as usize];
        }
        PointPerm { images }
    }

    pub fn inverse(&self) -> PointPerm {
        let mut images = [0u8; POINT_COUNT];
        for (i, &img) in self.images.iter().enumerate() {
            images[img as usize] = i as u8;
        }
        PointPerm { images }
    }

    pub fn is_identity(&self) -> bool {
        self.images.iter().enumerate().all(|(i, &img)| i as u8 == img)
    }

    #[inline]
    pub fn images(&self) -> &[u8; POINT_COUNT] {
        &self.images
    }

    /// Whether the permutation preserves adjacency of the graph.
    pub fn is_automorphism(&self, graph: &Graph) -> bool {
        let n = graph.order();
        for u in 0..n {
            for v in (u + 1)..n {
                let iu = self.images[u] as usize;
                let iv = self.images[v] as usize;
                if graph.adjacent(u, v) != graph.adjacent(iu, iv) {
                    return false;
                }
            }
        }
        true
    }
}

/// The 80 transvection permutations: 40 canonical directions × λ ∈ {1, 2}.
/// Scaling the direction does not change the map, so canonical
/// representatives exhaust them.
pub fn transvection_generators(gq: &Quadrangle) -> Result<Vec<PointPerm>> {
    let mut gens = Vec::with_capacity(2 * POINT_COUNT);
    for (_, v) in gq.points().iter() {
        for lambda in [Gf3::ONE, Gf3::TWO] {
            let m = GfMat::transvection(v, lambda);
            gens.push(PointPerm::from_matrix(gq, &m)?);
        }
    }
    Ok(gens)
}

/// The scale-2 similitude diag(1,2,1,2) whose point permutation extends
/// PSp(4,3) to PGSp(4,3).
pub fn similitude_generator(gq: &Quadrangle) -> Result<PointPerm> {
    PointPerm::from_matrix(gq, &GfMat::diagonal([1, 2, 1, 2]))
}

/// A finite permutation group held as an explicit element list.
#[derive(Clone, Debug)]
pub struct PermGroup {
    elements: Vec<PointPerm>,
}

impl PermGroup {
    pub fn order(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[PointPerm] {
        &self.elements
    }

    /// The elements fixing a point.
    pub fn stabilizer(&self, p: PointId) -> Vec<PointPerm> {
        self.elements
            .iter()
            .filter(|perm| perm.apply(p) == p)
            .cloned()
            .collect()
    }
}

/// Breadth-first closure of a generating set. Errors once the element count
/// would exceed `limit`, so callers can pin the expected group order.
pub fn close_group(generators: &[PointPerm], limit: usize) -> Result<PermGroup> {
    let mut seen: HashSet<[u8; POINT_COUNT]> = HashSet::new();
    let mut elements: Vec<PointPerm> = Vec::new();
    let mut queue: VecDeque<PointPerm> = VecDeque::new();

    let identity = PointPerm::identity();
    seen.insert(*identity.images());
    elements.push(identity.clone());
    queue.push_back(identity);

    while let Some(current) = queue.pop_front() {
        for generator in generators {
            let next = current.then(generator);
            if seen.insert(*next.images()) {
                if seen.len() > limit {
                    return Err(GeometryError::ClosureOverflow { limit });
                }
                elements.push(next.clone());
                queue.push_back(next);
            }
        }
    }

    info!(
        target: "w33::group",
        order = elements.len(),
        generators = generators.len(),
        "closed permutation group"
    );
    Ok(PermGroup { elements })
}

/// PSp(4,3) as the closure of the transvection action.
pub fn psp_group(gq: &Quadrangle) -> Result<PermGroup> {
    close_group(&transvection_generators(gq)?, PSP_ORDER)
}

/// PGSp(4,3): the transvections together with the duality similitude.
pub fn pgsp_group(gq: &Quadrangle) -> Result<PermGroup> {
    let mut gens = transvection_generators(gq)?;
    gens.push(similitude_generator(gq)?);
    close_group(&gens, PGSP_ORDER)
}

/// Orbit of a point under a generating set, ascending.
pub fn point_orbit(generators: &[PointPerm], seed: PointId) -> Vec<PointId> {
    let mut seen = [false; POINT_COUNT];
    seen[seed.index()] = true;
    let mut queue = VecDeque::from([seed]);
    while let Some(p) = queue.pop_front() {
        for generator in generators {
            let q = generator.apply(p);
            if !seen[q.index()] {
                seen[q.index()] = true;
                queue.push_back(q);
            }
        }
    }
    (0..POINT_COUNT)
        .filter(|&i| seen[i])
        .map(|i| PointId(i as u8))
        .collect()
}

/// Orbit of a point subset (bitmask) under a generating set, ascending.
pub fn mask_orbit(generators: &[PointPerm], seed: u64) -> Vec<u64> {
    let mut seen: HashSet<u64> = HashSet::from([seed]);
    let mut queue = VecDeque::from([seed]);
    while let Some(mask) = queue.pop_front() {
        for generator in generators {
            let image = generator.image_mask(mask);
            if seen.insert(image) {
                queue.push_back(image);
            }
        }
    }
    let mut orbit: Vec<u64> = seen.into_iter().collect();
    orbit.sort_unstable();
    orbit
}

/// Orbit of a spread under a generating set. Errors if a generator fails to
/// map lines to lines, i.e. is not an automorphism of the quadrangle.
pub fn spread_orbit(
    gq: &Quadrangle,
    generators: &[PointPerm],
    seed: &Spread,
) -> Result<Vec<Spread>> {
    let line_by_mask: HashMap<u64, LineId> = gq
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| (line.mask(), LineId(i as u8)))
        .collect();

    let image_of = |spread: &Spread, perm: &PointPerm| -> Result<Spread> {
        let mut lines = Vec::with_capacity(spread.lines().len());
        for id in spread.lines() {
            let mask = perm.image_mask(gq.line(id).mask());
            let image = line_by_mask
                .get(&mask)
                .copied()
                .ok_or(GeometryError::NotASpread(
                    "permutation does not map lines to lines",
                ))?;
            lines.push(image);
        }
        Spread::validate(gq, &lines)
    };

    let mut seen: HashSet<Spread> = HashSet::from([seed.clone()]);
    let mut queue = VecDeque::from([seed.clone()]);
    while let Some(spread) = queue.pop_front() {
        for generator in generators {
            let image = image_of(&spread, generator)?;
            if seen.insert(image.clone()) {
                queue.push_back(image);
            }
        }
    }
    let mut orbit: Vec<Spread> = seen.into_iter().collect();
    orbit.sort();
    debug!(
        target: "w33::group",
        size = orbit.len(),
        "computed spread orbit"
    );
    Ok(orbit)
}

/// Partition of the point set into orbits under a generating set.
pub fn orbit_partition(generators: &[PointPerm]) -> Vec<Vec<PointId>> {
    let mut assigned = [false; POINT_COUNT];
    let mut orbits = Vec::new();
    for i in 0..POINT_COUNT {
        if assigned[i] {
            continue;
        }
        let orbit = point_orbit(generators, PointId(i as u8));
        for p in &orbit {
            assigned[p.index()] = true;
        }
        orbits.push(orbit);
    }
    orbits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Quadrangle, Graph) {
        let gq = Quadrangle::build();
        let graph = Graph::collinearity(&gq);
        (gq, graph)
    }

    #[test]
    fn transvections_preserve_the_form() {
        let gq = Quadrangle::build();
        for (_, v) in gq.points().iter().take(8) {
            for lambda in [Gf3::ONE, Gf3::TWO] {
                let m = GfMat::transvection(v, lambda);
                assert!(m.is_symplectic());
                assert_eq!(m.similitude_factor(), Some(Gf3::ONE));
            }
        }
    }

    #[test]
    fn transvection_fixes_its_direction_hyperplane() {
        let v = GfVec::new([0, 0, 0, 1]);
        let m = GfMat::transvection(v, Gf3::ONE);
        for x in GfVec::all() {
            if form(x, v).is_zero() {
                assert_eq!(m.apply(x), x);
            }
        }
    }

    #[test]
    fn similitude_scales_the_form_by_two() {
        let m = GfMat::diagonal([1, 2, 1, 2]);
        assert_eq!(m.similitude_factor(), Some(Gf3::TWO));
        assert!(!m.is_symplectic());
    }

    #[test]
    fn singular_matrices_are_rejected() {
        let gq = Quadrangle::build();
        let m = GfMat::diagonal([1, 1, 1, 0]);
        assert!(matches!(
            PointPerm::from_matrix(&gq, &m),
            Err(GeometryError::ZeroVector)
        ));
    }

    #[test]
    fn identity_matrix_induces_identity_permutation() {
        let gq = Quadrangle::build();
        let perm = PointPerm::from_matrix(&gq, &GfMat::identity()).unwrap();
        assert!(perm.is_identity());
    }

    #[test]
    fn permutations_compose_and_invert() {
        let (gq, _) = setup();
        let a = similitude_generator(&gq).unwrap();
        let b = PointPerm::from_matrix(&gq, &GfMat::transvection(GfVec::new([0, 0, 0, 1]), Gf3::ONE))
            .unwrap();
        let ab = a.then(&b);
        for i in 0..POINT_COUNT {
            let p = PointId(i as u8);
            assert_eq!(ab.apply(p), b.apply(a.apply(p)));
        }
        assert!(a.then(&a.inverse()).is_identity());
        assert!(b.inverse().then(&b).is_identity());
    }

    #[test]
    fn generators_are_collinearity_automorphisms() {
        let (gq, graph) = setup();
        for generator in transvection_generators(&gq).unwrap() {
            assert!(generator.is_automorphism(&graph));
        }
        assert!(similitude_generator(&gq).unwrap().is_automorphism(&graph));
    }

    #[test]
    fn closure_limit_guard_trips() {
        let (gq, _) = setup();
        let gens = transvection_generators(&gq).unwrap();
        assert!(matches!(
            close_group(&gens[..4], 2),
            Err(GeometryError::ClosureOverflow { limit: 2 })
        ));
    }

    #[test]
    fn image_mask_tracks_point_images() {
        let (gq, _) = setup();
        let perm = similitude_generator(&gq).unwrap();
        let line_mask = gq.line(LineId(0)).mask();
        let image = perm.image_mask(line_mask);
        assert_eq!(image.count_ones(), 4);
        for p in gq.line(LineId(0)).points() {
            assert!(image >> perm.apply(p).index() & 1 == 1);
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! The symplectic group action: orders, orbits and transitivity.

use w33_core::group::{
    mask_orbit, orbit_partition, pgsp_group, point_orbit, psp_group, similitude_generator,
    spread_orbit, transvection_generators, PointPerm, PGSP_ORDER, PSP_ORDER,
};
use w33_core::spreads::enumerate_spreads;
use w33_core::symplectic::count_hyperbolic_bases;
use w33_core::triangles::triangles;
use w33_core::{Graph, LineId, PointId, Quadrangle, POINT_COUNT};

fn full_generators(gq: &Quadrangle) -> Vec<PointPerm> {
    let mut gens = transvection_generators(gq).unwrap();
    gens.push(similitude_generator(gq).unwrap());
    gens
}

#[test]
fn transvections_close_into_psp() {
    let gq = Quadrangle::build();
    let group = psp_group(&gq).unwrap();
    assert_eq!(group.order(), PSP_ORDER);
}

#[test]
fn similitude_extends_to_pgsp() {
    let gq = Quadrangle::build();
    let group = pgsp_group(&gq).unwrap();
    assert_eq!(group.order(), PGSP_ORDER);
    assert_eq!(group.order(), 2 * PSP_ORDER);
}

#[test]
fn action_is_transitive_of_rank_three() {
    let gq = Quadrangle::build();
    let gens = full_generators(&gq);

    let orbit = point_orbit(&gens, PointId(0));
    assert_eq!(orbit.len(), POINT_COUNT);

    let group = pgsp_group(&gq).unwrap();
    let stabilizer = group.stabilizer(PointId(0));
    assert_eq!(stabilizer.len(), PGSP_ORDER / POINT_COUNT);

    let mut sizes: Vec<usize> = orbit_partition(&stabilizer)
        .into_iter()
        .map(|orbit| orbit.len())
        .collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 12, 27]);
}

#[test]
fn lines_triangles_and_spreads_form_single_orbits() {
    let gq = Quadrangle::build();
    let gens = full_generators(&gq);

    let line_orbit = mask_orbit(&gens, gq.line(LineId(0)).mask());
    assert_eq!(line_orbit.len(), 40);

    let graph = Graph::collinearity(&gq);
    let first_triangle = triangles(&graph)[0];
    let triangle_mask = first_triangle.iter().fold(0u64, |m, &v| m | 1 << v);
    let triangle_orbit = mask_orbit(&gens, triangle_mask);
    assert_eq!(triangle_orbit.len(), 160);

    let mut spreads = enumerate_spreads(&gq);
    let orbit = spread_orbit(&gq, &gens, &spreads[0]).unwrap();
    assert_eq!(orbit.len(), 36);
    spreads.sort();
    assert_eq!(orbit, spreads);
}

#[test]
fn every_group_element_is_a_graph_automorphism() {
    let gq = Quadrangle::build();
    let graph = Graph::collinearity(&gq);
    let group = pgsp_group(&gq).unwrap();
    assert!(group
        .elements()
        .iter()
        .all(|perm| perm.is_automorphism(&graph)));
}

#[test]
fn hyperbolic_bases_count_the_symplectic_group() {
    // Sp(4,3) acts simply transitively on ordered hyperbolic bases.
    assert_eq!(count_hyperbolic_bases(), 51840);
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! The consolidated JSON artifact of a full exploration run.
//!
//! One [`W33Summary`] replaces the per-script result files: every invariant
//! the library derives — incidence counts, SRG parameters, spectrum,
//! substructure census, group orders — lands in a single serialisable
//! struct, with an open extras map for run-specific additions such as the
//! MUB verification results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use tracing::info;

use crate::cliques;
use crate::error::Result;
use crate::graph::{Graph, SrgParams};
use crate::group;
use crate::spectrum::{self, SrgSpectrum};
use crate::spreads;
use crate::symplectic::{count_hyperbolic_bases, Quadrangle};
use crate::triangles::{self, TripleCensus};

/// Invariants of the W33 object, bundled for serialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct W33Summary {
    pub points: usize,
    pub lines: usize,
    pub point_graph: SrgParams,
    pub line_graph: SrgParams,
    pub spectrum: SrgSpectrum,
    pub edges: usize,
    pub triangles: usize,
    pub maximal_cliques: usize,
    pub clique_number: usize,
    pub point_independence_number: usize,
    pub line_independence_number: usize,
    pub spreads: usize,
    pub hyperbolic_bases: usize,
    pub psp_order: usize,
    pub pgsp_order: usize,
    pub extras: BTreeMap<String, Value>,
}

impl W33Summary {
    /// Computes every field from the quadrangle. Cross-checkable quantities
    /// are asserted, so a summary that builds is internally consistent.
    pub fn collect(gq: &Quadrangle) -> Result<W33Summary> {
        let point_graph = Graph::collinearity(gq);
        let line_graph = Graph::line_intersection(gq);

        let params = point_graph
            .srg_params()
            .expect("the collinearity graph of W(3,3) is strongly regular");
        let line_params = line_graph
            .srg_params()
            .expect("the line graph of W(3,3) is strongly regular");
        assert!(params.is_feasible(), "SRG parameters fail the counting identity");

        let spec = spectrum::exact_spectrum(params)
            .expect("SRG(40,12,2,4) has an integer spectrum");
        assert!(spec.is_consistent(params), "spectrum fails the trace conditions");

        let census = triangles::classify_triples(&point_graph);
        assert_eq!(
            census,
            TripleCensus::from_params(params),
            "triple census disagrees with its closed form"
        );

        let maximal = cliques::maximal_cliques(&point_graph);
        let clique_number = maximal.iter().map(Vec::len).max().unwrap_or(0);
        let point_coclique = cliques::maximum_coclique(&point_graph);
        let line_coclique = cliques::maximum_coclique(&line_graph);

        let spreads = spreads::enumerate_spreads(gq);
        let psp = group::psp_group(gq)?;
        let pgsp = group::pgsp_group(gq)?;

        let summary = W33Summary {
            points: gq.points().len(),
            lines: gq.lines().len(),
            point_graph: params,
            line_graph: line_params,
            spectrum: spec,
            edges: point_graph.edge_count(),
            triangles: census.triangles,
            maximal_cliques: maximal.len(),
            clique_number,
            point_independence_number: point_coclique.len(),
            line_independence_number: line_coclique.len(),
            spreads: spreads.len(),
            hyperbolic_bases: count_hyperbolic_bases(),
            psp_order: psp.order(),
            pgsp_order: pgsp.order(),
            extras: BTreeMap::new(),
        };
        info!(
            target: "w33::summary",
            spreads = summary.spreads,
            pgsp = summary.pgsp_order,
            "collected summary artifact"
        );
        Ok(summary)
    }

    pub fn insert_extra(&mut self, key: impl Into<String>, value: Value) {
        self.extras.insert(key.into(), value);
    }

    pub fn insert_extra_number(&mut self, key: impl Into<String>, value: f64) {
        self.insert_extra(key, Value::from(value));
    }

    pub fn insert_extra_flag(&mut self, key: impl Into<String>, value: bool) {
        self.insert_extra(key, Value::from(value));
    }

    pub fn insert_extra_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_extra(key, Value::from(value.into()));
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json_str(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

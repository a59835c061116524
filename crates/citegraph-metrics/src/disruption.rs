//! Triadic disruption index.
//!
//! # Overview
//!
//! Disruption (Wu, Wang & Evans, 2019, adapted to case law) asks whether
//! a judgement displaces the precedents it builds on or consolidates
//! them. For a focal case `f` with citers `P` (cases citing `f`) and
//! references `O` (cases `f` cites), each reference is classed by whether
//! any citer also cites it directly:
//!
//! - `j`: references in `O` that some `p ∈ P` also cites. Citers reaching
//!   past `f` to its sources treat `f` as consolidating.
//! - `i`: the remaining references, `O \ j`. Citers that stop at `f`
//!   treat it as the new point of departure.
//! - `k`: citations by the citers to cases outside `O ∪ {f}`, counted per
//!   citer, so a bystander case cited by three citers contributes three.
//!   This measures how much of the citers' attention `f` never held.
//!
//! ```text
//! disruption(f) = (|i| - |j|) / (|i| + |j| + |k|)
//! ```
//!
//! Scores run from -1 (purely consolidating) to 1 (purely disruptive).
//! A case with no qualifying triads (`i = j = k = 0`) has an undefined
//! index and is reported as NaN.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashSet;

use citegraph_core::CitationGraph;
use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::centrality::{MetricResult, to_ecli_map};

/// Compute the disruption index for every case.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
pub fn disruption(g: &CitationGraph) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(crate::MetricMap::new());
    }

    // Successor sets are probed once per (citer, reference) pair and once
    // per bystander; build them up front instead of re-walking edges.
    let mut successors: Vec<HashSet<NodeIndex>> = vec![HashSet::new(); n];
    for v in g.nodes() {
        successors[v.index()] = g.outgoing(v).collect();
    }

    let mut scores = vec![f64::NAN; n];

    for f in g.nodes() {
        let citers: Vec<NodeIndex> = g.incoming(f).collect();
        let references = &successors[f.index()];

        let consolidated: HashSet<NodeIndex> = references
            .iter()
            .copied()
            .filter(|&o| citers.iter().any(|p| successors[p.index()].contains(&o)))
            .collect();

        let j = consolidated.len();
        let i = references.len() - j;

        let k: usize = citers
            .iter()
            .map(|&p| {
                successors[p.index()]
                    .iter()
                    .filter(|&&s| s != f && !consolidated.contains(&s))
                    .count()
            })
            .sum();

        let denominator = i + j + k;
        if denominator > 0 {
            scores[f.index()] = (i as f64 - j as f64) / denominator as f64;
        }
    }

    Ok(to_ecli_map(g, &scores))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

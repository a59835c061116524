//! Closeness and harmonic centrality over inward citation paths.
//!
//! # Overview
//!
//! Both measures ask how near a case sits to the rest of the network,
//! using **inward** distances (the length of the citation chain by which
//! other cases reach this one), the standard convention for directed
//! closeness.
//!
//! - [`closeness_centrality`]: inverse of the average inward distance,
//!   scaled by the fraction of the graph that can reach the node
//!   (Wasserman–Faust), so partially reachable nodes are not rewarded for
//!   their small horizon. A node nothing reaches — an isolated node in
//!   particular — has no defined average distance and is reported as NaN
//!   (uncomputed), never silently 0.
//! - [`harmonic_centrality`]: sum of reciprocal inward distances, raw.
//!   Unreachable pairs contribute `1/∞ = 0`, so disconnection degrades
//!   the score gracefully instead of undefining it.

#![allow(clippy::cast_precision_loss)]

use std::collections::VecDeque;

use citegraph_core::CitationGraph;
use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::centrality::MetricResult;

/// Compute Wasserman–Faust closeness centrality for every case.
///
/// Unreached nodes get `f64::NAN`.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
pub fn closeness_centrality(g: &CitationGraph) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(super::MetricMap::new());
    }

    let mut scores = vec![f64::NAN; n];

    for v in g.nodes() {
        let dist = inward_distances(g, v);
        let reached: Vec<i64> = dist.iter().copied().filter(|&d| d >= 0).collect();
        // reached includes v itself at distance 0.
        let r = reached.len();
        if r <= 1 {
            continue;
        }

        let total: i64 = reached.iter().sum();
        let inverse_avg = (r - 1) as f64 / total as f64;
        let reach_fraction = (r - 1) as f64 / (n - 1) as f64;
        scores[v.index()] = inverse_avg * reach_fraction;
    }

    Ok(super::to_ecli_map(g, &scores))
}

/// Compute harmonic centrality (raw reciprocal-distance sum) for every case.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
pub fn harmonic_centrality(g: &CitationGraph) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(super::MetricMap::new());
    }

    let mut scores = vec![0.0; n];

    for v in g.nodes() {
        let dist = inward_distances(g, v);
        scores[v.index()] = dist
            .iter()
            .filter(|&&d| d > 0)
            .map(|&d| 1.0 / d as f64)
            .sum();
    }

    Ok(super::to_ecli_map(g, &scores))
}

/// BFS over incoming edges from `target`: `dist[u]` is the length of the
/// shortest directed path `u → … → target`, or -1 if none exists.
fn inward_distances(g: &CitationGraph, target: NodeIndex) -> Vec<i64> {
    let mut dist = vec![-1_i64; g.node_count()];
    dist[target.index()] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(target);

    while let Some(v) = queue.pop_front() {
        let d = dist[v.index()];
        for u in g.incoming(v) {
            if dist[u.index()] < 0 {
                dist[u.index()] = d + 1;
                queue.push_back(u);
            }
        }
    }

    dist
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::testutil::{graph, graph_from_edges};

    #[test]
    fn isolated_node_closeness_is_uncomputed() {
        let scores = closeness_centrality(&graph(&["E1"], &[])).expect("closeness");
        assert!(scores["E1"].is_nan());
    }

    #[test]
    fn unreached_source_is_uncomputed() {
        // A → B: nothing reaches A, so its inward closeness is undefined.
        let scores = closeness_centrality(&graph_from_edges(&[("A", "B")])).expect("closeness");
        assert!(scores["A"].is_nan());
        assert!((scores["B"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn chain_sink_scores_with_reach_scaling() {
        // A → B → C, inward distances to C: B=1, A=2.
        // inverse avg = 2/3, reach fraction = 2/2 → 2/3.
        let scores =
            closeness_centrality(&graph_from_edges(&[("A", "B"), ("B", "C")])).expect("closeness");
        assert!((scores["C"] - 2.0 / 3.0).abs() < 1e-12);
        // B is reached only by A: inverse avg = 1, reach fraction = 1/2.
        assert!((scores["B"] - 0.5).abs() < 1e-12);
        assert!(scores["A"].is_nan());
    }

    #[test]
    fn harmonic_sums_reciprocal_distances() {
        // Inward distances to C: B=1, A=2 → 1 + 1/2.
        let scores =
            harmonic_centrality(&graph_from_edges(&[("A", "B"), ("B", "C")])).expect("harmonic");
        assert!((scores["C"] - 1.5).abs() < 1e-12);
        assert!((scores["B"] - 1.0).abs() < 1e-12);
        assert!((scores["A"] - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn harmonic_isolated_node_is_zero() {
        let scores = harmonic_centrality(&graph(&["E1", "E2"], &[])).expect("harmonic");
        assert!((scores["E1"] - 0.0).abs() < f64::EPSILON);
        assert!((scores["E2"] - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disconnection_degrades_harmonic_not_closeness_defined() {
        // Two islands: A → B and C → D.
        let g = graph_from_edges(&[("A", "B"), ("C", "D")]);
        let closeness = closeness_centrality(&g).expect("closeness");
        let harmonic = harmonic_centrality(&g).expect("harmonic");

        // B is reached by 1 of 3 other nodes.
        assert!((closeness["B"] - (1.0 / 1.0) * (1.0 / 3.0)).abs() < 1e-12);
        assert!((harmonic["B"] - 1.0).abs() < 1e-12);
        assert!(closeness["A"].is_nan());
    }
}

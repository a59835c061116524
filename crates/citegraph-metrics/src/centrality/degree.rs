//! Degree-based centrality measures.
//!
//! Four measures with deliberately different normalization, so each keeps
//! its own interpretable scale:
//!
//! - [`degree_centrality`]: `(in + out) / (N - 1)` — the classic
//!   normalized form. On a simple directed graph the value can reach 2.0
//!   when a node both cites and is cited by every other node.
//! - [`in_degree_centrality`] / [`out_degree_centrality`]: raw counts.
//! - [`relative_in_degree`]: `in / N`, an interpretable "fraction of the
//!   corpus citing this case".

#![allow(clippy::cast_precision_loss)]

use citegraph_core::CitationGraph;
use tracing::instrument;

use crate::centrality::MetricResult;

/// Degree centrality: total degree normalized by `N - 1`.
///
/// A single-node graph yields 0.0 for its node; the empty graph yields an
/// empty map.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
pub fn degree_centrality(g: &CitationGraph) -> MetricResult {
    let n = g.node_count();
    let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };

    let scores: Vec<f64> = g
        .nodes()
        .map(|idx| (g.incoming(idx).count() + g.outgoing(idx).count()) as f64 * scale)
        .collect();

    Ok(super::to_ecli_map(g, &scores))
}

/// Raw in-degree: how many cases in the set cite this one.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
pub fn in_degree_centrality(g: &CitationGraph) -> MetricResult {
    let scores: Vec<f64> = g.nodes().map(|idx| g.incoming(idx).count() as f64).collect();
    Ok(super::to_ecli_map(g, &scores))
}

/// Raw out-degree: how many cases in the set this one cites.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
pub fn out_degree_centrality(g: &CitationGraph) -> MetricResult {
    let scores: Vec<f64> = g.nodes().map(|idx| g.outgoing(idx).count() as f64).collect();
    Ok(super::to_ecli_map(g, &scores))
}

/// Relative in-degree: in-degree divided by the total node count.
///
/// The empty graph yields an empty map, so the division is always defined.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
pub fn relative_in_degree(g: &CitationGraph) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(super::MetricMap::new());
    }

    let scores: Vec<f64> = g
        .nodes()
        .map(|idx| g.incoming(idx).count() as f64 / n as f64)
        .collect();

    Ok(super::to_ecli_map(g, &scores))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::testutil::{graph, graph_from_edges};

    #[test]
    fn degree_centrality_empty_graph() {
        let scores = degree_centrality(&graph(&[], &[])).expect("degree");
        assert!(scores.is_empty());
    }

    #[test]
    fn degree_centrality_single_node_is_zero() {
        let scores = degree_centrality(&graph(&["E1"], &[])).expect("degree");
        assert!((scores["E1"] - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn degree_centrality_three_cycle_is_one() {
        // In-degree 1 and out-degree 1 each, normalized by N−1 = 2.
        let g = graph_from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let scores = degree_centrality(&g).expect("degree");
        for ecli in ["A", "B", "C"] {
            assert!(
                (scores[ecli] - 1.0).abs() < 1e-12,
                "{ecli} should have degree centrality 1.0, got {}",
                scores[ecli]
            );
        }
    }

    #[test]
    fn degree_centrality_in_unit_interval_for_chain() {
        let g = graph_from_edges(&[("A", "B"), ("B", "C")]);
        let scores = degree_centrality(&g).expect("degree");
        for score in scores.values() {
            assert!((0.0..=1.0).contains(score));
        }
    }

    #[test]
    fn in_and_out_degree_are_raw_counts() {
        let g = graph_from_edges(&[("A", "B"), ("A", "C"), ("B", "C")]);
        let ins = in_degree_centrality(&g).expect("in");
        let outs = out_degree_centrality(&g).expect("out");

        assert!((ins["C"] - 2.0).abs() < f64::EPSILON);
        assert!((ins["A"] - 0.0).abs() < f64::EPSILON);
        assert!((outs["A"] - 2.0).abs() < f64::EPSILON);
        assert!((outs["C"] - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn relative_in_degree_divides_by_node_count() {
        let g = graph(&["A", "B", "C", "D"], &[("A", "B"), ("C", "B")]);
        let scores = relative_in_degree(&g).expect("relative");
        assert!((scores["B"] - 0.5).abs() < 1e-12);
        assert!((scores["A"] - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn relative_in_degree_empty_graph_guarded() {
        let scores = relative_in_degree(&graph(&[], &[])).expect("relative");
        assert!(scores.is_empty());
    }
}

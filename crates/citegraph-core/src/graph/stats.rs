//! Summary statistics for a citation graph.
//!
//! # Statistics Provided
//!
//! - **node_count / edge_count**: Totals after integrity filtering.
//! - **density**: `edge_count / (node_count * (node_count - 1))` for a
//!   directed graph. Zero for graphs with fewer than 2 nodes.
//! - **weak_component_count / component_sizes**: Weakly connected
//!   components (edge direction ignored), sizes sorted descending. More
//!   than one component means the citation network is split into disjoint
//!   islands, which matters for the path-based and current-flow measures.
//! - **isolated_node_count**: Cases with no citations in either direction.
//! - **max_in_degree / max_out_degree**: Most-cited case and
//!   widest-citing case.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::CitationGraph;

/// Summary statistics computed from a frozen [`CitationGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of cases in the graph.
    pub node_count: usize,
    /// Number of citation edges.
    pub edge_count: usize,
    /// Directed density, 0.0 for graphs with fewer than 2 nodes.
    pub density: f64,
    /// Number of weakly connected components.
    pub weak_component_count: usize,
    /// Component sizes, largest first.
    pub component_sizes: Vec<usize>,
    /// Cases with neither incoming nor outgoing citations.
    pub isolated_node_count: usize,
    /// Highest in-degree (times the most-cited case is cited).
    pub max_in_degree: usize,
    /// Highest out-degree (widest citing case).
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a citation graph.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_graph(g: &CitationGraph) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let density = if node_count < 2 {
            0.0
        } else {
            edge_count as f64 / (node_count * (node_count - 1)) as f64
        };

        let weak_component_count = connected_components(g.digraph());
        let component_sizes = component_sizes(g);

        let mut isolated_node_count = 0;
        let mut max_in_degree = 0;
        let mut max_out_degree = 0;
        for idx in g.nodes() {
            let in_d = g.incoming(idx).count();
            let out_d = g.outgoing(idx).count();
            if in_d == 0 && out_d == 0 {
                isolated_node_count += 1;
            }
            max_in_degree = max_in_degree.max(in_d);
            max_out_degree = max_out_degree.max(out_d);
        }

        Self {
            node_count,
            edge_count,
            density,
            weak_component_count,
            component_sizes,
            isolated_node_count,
            max_in_degree,
            max_out_degree,
        }
    }
}

/// Weakly-connected component sizes via DFS over both edge directions,
/// sorted descending.
fn component_sizes(g: &CitationGraph) -> Vec<usize> {
    let n = g.node_count();
    let mut visited = vec![false; n];
    let mut sizes = Vec::new();

    for start in g.nodes() {
        if visited[start.index()] {
            continue;
        }

        let mut stack = vec![start];
        let mut size = 0usize;
        while let Some(node) = stack.pop() {
            if visited[node.index()] {
                continue;
            }
            visited[node.index()] = true;
            size += 1;
            for neighbor in g.outgoing(node).chain(g.incoming(node)) {
                if !visited[neighbor.index()] {
                    stack.push(neighbor);
                }
            }
        }
        sizes.push(size);
    }

    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CaseRecord, CitationRecord};

    fn build(nodes: &[&str], edges: &[(&str, &str)]) -> CitationGraph {
        let records: Vec<CaseRecord> = nodes.iter().map(|e| CaseRecord::with_ecli(e)).collect();
        let citations: Vec<CitationRecord> = edges
            .iter()
            .map(|(a, b)| CitationRecord {
                citing: (*a).to_string(),
                cited: vec![(*b).to_string()],
            })
            .collect();
        CitationGraph::build(&records, &citations)
    }

    #[test]
    fn empty_graph_stats() {
        let stats = GraphStats::from_graph(&build(&[], &[]));
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert!((stats.density - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.weak_component_count, 0);
    }

    #[test]
    fn two_nodes_one_edge_density() {
        // E1 → E2: density = 1 / (2*1) = 0.5
        let stats = GraphStats::from_graph(&build(&["E1", "E2"], &[("E1", "E2")]));
        assert!((stats.density - 0.5).abs() < 1e-10);
        assert_eq!(stats.weak_component_count, 1);
    }

    #[test]
    fn disjoint_chains_and_isolated_node() {
        let g = build(
            &["E1", "E2", "E3", "E4"],
            &[("E1", "E2"), ("E2", "E3")],
        );
        let stats = GraphStats::from_graph(&g);

        assert_eq!(stats.weak_component_count, 2);
        assert_eq!(stats.component_sizes, vec![3, 1]);
        assert_eq!(stats.isolated_node_count, 1);
    }

    #[test]
    fn degree_extremes() {
        // E1 cites everything; E4 cited twice.
        let g = build(
            &["E1", "E2", "E3", "E4"],
            &[("E1", "E2"), ("E1", "E3"), ("E1", "E4"), ("E2", "E4")],
        );
        let stats = GraphStats::from_graph(&g);
        assert_eq!(stats.max_out_degree, 3);
        assert_eq!(stats.max_in_degree, 2);
    }
}

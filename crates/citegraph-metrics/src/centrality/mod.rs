//! Centrality measures for the citation graph.
//!
//! # Overview
//!
//! Every measure is an independent pure function
//! `fn(&CitationGraph) -> MetricResult` over the same frozen graph — there
//! is no shared state between measures and no prescribed ordering. Each
//! answers a different question about a case's structural importance:
//!
//! - **Degree family** (`degree`): How widely is a case cited, and how
//!   widely does it cite?
//! - **Core number** (`kcore`): How deep does a case sit in the densely
//!   interlinked core of the network?
//! - **Spectral measures** (`eigenvector`, `pagerank`, `hits`): Is a case
//!   connected to other important cases?
//! - **Path-based measures** (`betweenness`, `closeness`): Does a case
//!   bridge otherwise-distant areas of case law, and how near is it to the
//!   rest of the network?
//! - **Flow-based measures** (`current_flow`, `forest`): Electrical-network
//!   analogues that stay meaningful on disconnected graphs by working per
//!   weakly-connected component.
//! - **Trophic level** (`trophic`): Recursive layering above the cases
//!   that cite nothing in the set; requires acyclicity.
//!
//! Normalization conventions differ deliberately between measures and are
//! documented on each function, since the downstream regression is
//! sensitive to scale.

use std::collections::HashMap;

use citegraph_core::CitationGraph;
use petgraph::graph::NodeIndex;

use crate::error::MetricError;

pub mod betweenness;
pub mod closeness;
pub mod current_flow;
pub mod degree;
pub mod eigenvector;
pub mod forest;
pub mod hits;
pub mod kcore;
pub mod pagerank;
pub mod trophic;

pub use betweenness::betweenness_centrality;
pub use closeness::{closeness_centrality, harmonic_centrality};
pub use current_flow::{current_flow_betweenness, current_flow_closeness};
pub use degree::{
    degree_centrality, in_degree_centrality, out_degree_centrality, relative_in_degree,
};
pub use eigenvector::eigenvector_centrality;
pub use forest::forest_closeness;
pub use hits::hits;
pub use kcore::core_number;
pub use pagerank::pagerank;
pub use trophic::trophic_level;

/// Scores keyed by ECLI.
pub type MetricMap = HashMap<String, f64>;

/// Outcome of a single measure.
pub type MetricResult = Result<MetricMap, MetricError>;

/// Re-key a node-indexed score vector by ECLI.
pub(crate) fn to_ecli_map(g: &CitationGraph, scores: &[f64]) -> MetricMap {
    g.nodes()
        .filter_map(|idx| {
            g.ecli(idx)
                .map(|ecli| (ecli.to_string(), scores[idx.index()]))
        })
        .collect()
}

/// Weakly-connected components as node lists, discovered by DFS over both
/// edge directions. Order within and between components is unspecified.
pub(crate) fn weak_components(g: &CitationGraph) -> Vec<Vec<NodeIndex>> {
    let n = g.node_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for start in g.nodes() {
        if visited[start.index()] {
            continue;
        }

        let mut stack = vec![start];
        let mut members = Vec::new();
        while let Some(node) = stack.pop() {
            if visited[node.index()] {
                continue;
            }
            visited[node.index()] = true;
            members.push(node);
            for neighbor in g.outgoing(node).chain(g.incoming(node)) {
                if !visited[neighbor.index()] {
                    stack.push(neighbor);
                }
            }
        }
        components.push(members);
    }

    components
}

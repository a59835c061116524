//! Current-flow betweenness and closeness centrality.
//!
//! # Overview
//!
//! The electrical-network analogues of betweenness and closeness: treat
//! the undirected projection of the citation graph as a resistor network
//! with unit resistances, inject a unit current between node pairs, and
//! score nodes by the current that passes through them (betweenness) or
//! by their total effective resistance to the rest (closeness, also known
//! as information centrality).
//!
//! # Components
//!
//! The Laplacian of a disconnected graph is singular beyond its rank-1
//! nullspace, so both measures are computed **per weakly-connected
//! component** and merged by ECLI. Components with fewer than two nodes
//! default to closeness 0; a pseudo-inverse that still fails numerically
//! yields 0 for every node of the affected component instead of aborting
//! the measure.
//!
//! # Conventions
//!
//! - The undirected projection is simple: a mutual citation collapses to
//!   one unit resistor.
//! - Betweenness excludes the endpoints of each pair and is normalized by
//!   the `(m-1)(m-2)/2` interior pairs of an `m`-node component, giving
//!   values in `[0, 1]`. Components with fewer than three nodes have no
//!   interior pairs and score 0.
//! - Closeness of node `v` in an `m`-node component is
//!   `(m-1) / Σ_w R(v, w)` with `R` the effective resistance.

#![allow(clippy::cast_precision_loss)]

use std::collections::{BTreeSet, HashMap};

use citegraph_core::CitationGraph;
use nalgebra::DMatrix;
use petgraph::graph::NodeIndex;
use tracing::{instrument, warn};

use crate::centrality::{MetricResult, weak_components};

/// Compute current-flow (random-walk) betweenness centrality.
///
/// # Errors
///
/// Infallible; degenerate solves degrade to 0 rather than erroring.
#[instrument(skip(g))]
pub fn current_flow_betweenness(g: &CitationGraph) -> MetricResult {
    per_component(g, component_betweenness)
}

/// Compute current-flow closeness (information) centrality.
///
/// # Errors
///
/// Infallible; degenerate solves degrade to 0 rather than erroring.
#[instrument(skip(g))]
pub fn current_flow_closeness(g: &CitationGraph) -> MetricResult {
    per_component(g, component_closeness)
}

/// Run a per-component scorer over every weakly-connected component and
/// merge the node-indexed scores.
fn per_component(
    g: &CitationGraph,
    scorer: fn(&Component) -> Vec<f64>,
) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(super::MetricMap::new());
    }

    let mut scores = vec![0.0; n];
    for members in weak_components(g) {
        let component = Component::project(g, members);
        let local = scorer(&component);
        for (i, &node) in component.members.iter().enumerate() {
            scores[node.index()] = local[i];
        }
    }

    Ok(super::to_ecli_map(g, &scores))
}

/// Undirected projection of one weakly-connected component.
struct Component {
    members: Vec<NodeIndex>,
    /// Unique undirected edges as local index pairs.
    edges: Vec<(usize, usize)>,
    /// Local adjacency lists.
    adjacency: Vec<Vec<usize>>,
}

impl Component {
    fn project(g: &CitationGraph, members: Vec<NodeIndex>) -> Self {
        let local: HashMap<NodeIndex, usize> = members
            .iter()
            .enumerate()
            .map(|(i, &node)| (node, i))
            .collect();

        let mut pairs: BTreeSet<(usize, usize)> = BTreeSet::new();
        for &v in &members {
            let vi = local[&v];
            for w in g.outgoing(v) {
                if let Some(&wi) = local.get(&w) {
                    pairs.insert((vi.min(wi), vi.max(wi)));
                }
            }
        }

        let edges: Vec<(usize, usize)> = pairs.into_iter().collect();
        let mut adjacency = vec![Vec::new(); members.len()];
        for &(a, b) in &edges {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        Self {
            members,
            edges,
            adjacency,
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    /// Laplacian pseudo-inverse, or `None` when the solve degenerates.
    fn laplacian_pseudo_inverse(&self) -> Option<DMatrix<f64>> {
        let m = self.len();
        let mut lap = DMatrix::<f64>::zeros(m, m);
        for &(a, b) in &self.edges {
            lap[(a, a)] += 1.0;
            lap[(b, b)] += 1.0;
            lap[(a, b)] -= 1.0;
            lap[(b, a)] -= 1.0;
        }

        match lap.pseudo_inverse(1e-12) {
            Ok(pinv) => Some(pinv),
            Err(reason) => {
                warn!(component_size = m, reason, "Laplacian pseudo-inverse failed");
                None
            }
        }
    }
}

fn component_closeness(component: &Component) -> Vec<f64> {
    let m = component.len();
    if m < 2 {
        return vec![0.0; m];
    }

    let Some(pinv) = component.laplacian_pseudo_inverse() else {
        return vec![0.0; m];
    };

    (0..m)
        .map(|v| {
            let total_resistance: f64 = (0..m)
                .filter(|&w| w != v)
                .map(|w| pinv[(v, v)] + pinv[(w, w)] - 2.0 * pinv[(v, w)])
                .sum();
            if total_resistance > 0.0 && total_resistance.is_finite() {
                (m - 1) as f64 / total_resistance
            } else {
                0.0
            }
        })
        .collect()
}

fn component_betweenness(component: &Component) -> Vec<f64> {
    let m = component.len();
    if m < 3 {
        return vec![0.0; m];
    }

    let Some(pinv) = component.laplacian_pseudo_inverse() else {
        return vec![0.0; m];
    };

    let mut throughput = vec![0.0; m];
    for s in 0..m {
        for t in (s + 1)..m {
            // Node potentials for a unit s→t current.
            let potential: Vec<f64> = (0..m)
                .map(|v| pinv[(v, s)] - pinv[(v, t)])
                .collect();

            for (v, through) in throughput.iter_mut().enumerate() {
                if v == s || v == t {
                    continue;
                }
                let flow: f64 = component.adjacency[v]
                    .iter()
                    .map(|&u| (potential[v] - potential[u]).abs())
                    .sum();
                *through += 0.5 * flow;
            }
        }
    }

    let interior_pairs = ((m - 1) * (m - 2)) as f64 / 2.0;
    throughput.iter().map(|t| t / interior_pairs).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Core number via k-core peeling.
//!
//! # Overview
//!
//! The core number of a node is the largest `k` such that the node
//! survives repeatedly deleting every node of degree less than `k`.
//! Degree here is total degree (in + out), matching the treatment of a
//! directed graph as its underlying multigraph.
//!
//! # Algorithm
//!
//! Batagelj–Zaveršnik bin-sort peeling, O(V + E): process nodes in
//! nondecreasing degree order; when a node is peeled, its unpeeled
//! neighbors of higher current degree lose one degree and move down a
//! bin. Each in-edge and out-edge counts as a separate neighbor
//! occurrence, so a mutual citation contributes 2 to both endpoints.

use citegraph_core::CitationGraph;
use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::centrality::MetricResult;

/// Compute the core number of every node.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn core_number(g: &CitationGraph) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(super::MetricMap::new());
    }

    // Neighbor occurrences over both directions (duplicates intended).
    let neighbors: Vec<Vec<NodeIndex>> = g
        .nodes()
        .map(|idx| g.incoming(idx).chain(g.outgoing(idx)).collect())
        .collect();
    let mut degree: Vec<usize> = neighbors.iter().map(Vec::len).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // Bin sort: vert holds nodes ordered by current degree, pos tracks
    // each node's slot, bin_start[d] is the first slot of degree d.
    let mut bin_start = vec![0usize; max_degree + 2];
    for &d in &degree {
        bin_start[d + 1] += 1;
    }
    for d in 1..bin_start.len() {
        bin_start[d] += bin_start[d - 1];
    }
    let mut next_slot = bin_start.clone();
    let mut vert = vec![0usize; n];
    let mut pos = vec![0usize; n];
    for v in 0..n {
        let slot = next_slot[degree[v]];
        vert[slot] = v;
        pos[v] = slot;
        next_slot[degree[v]] += 1;
    }

    let mut core = degree.clone();
    for i in 0..n {
        let v = vert[i];
        core[v] = degree[v];
        for &u in &neighbors[v] {
            let u = u.index();
            if degree[u] > degree[v] {
                // Move u to the front of its bin, then shrink its degree.
                let du = degree[u];
                let pu = pos[u];
                let pw = bin_start[du];
                let w = vert[pw];
                if u != w {
                    vert[pu] = w;
                    vert[pw] = u;
                    pos[u] = pw;
                    pos[w] = pu;
                }
                bin_start[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    let scores: Vec<f64> = core.iter().map(|&c| c as f64).collect();
    Ok(super::to_ecli_map(g, &scores))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a case lies on shortest citation paths
//! between other pairs of cases. High-betweenness judgements bridge
//! otherwise-distant areas of case law.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted directed graphs, exact (no sampling):
//!
//! 1. For each source node `s`, BFS computes shortest-path counts and
//!    distances.
//! 2. Dependency scores accumulate in reverse BFS order.
//! 3. Scores sum over all sources and are normalized by
//!    `(N - 1) * (N - 2)`, the number of ordered pairs a node can sit
//!    between, giving values in `[0, 1]`. Graphs with fewer than three
//!    nodes have no interior pairs and score 0 everywhere.

#![allow(clippy::cast_precision_loss)]

use std::collections::VecDeque;

use citegraph_core::CitationGraph;
use petgraph::graph::NodeIndex;
use tracing::instrument;

use crate::centrality::MetricResult;

/// Compute normalized betweenness centrality for every case.
///
/// # Errors
///
/// Infallible; the `Result` keeps the panel signature uniform.
#[instrument(skip(g))]
pub fn betweenness_centrality(g: &CitationGraph) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(super::MetricMap::new());
    }

    let mut cb: Vec<f64> = vec![0.0; n];

    for s in g.nodes() {
        let si = s.index();

        // Discovery order; farthest nodes pop first.
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        let mut dist: Vec<i64> = vec![-1; n];
        dist[si] = 0;

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = v.index();
            stack.push(v);

            for w in g.outgoing(v) {
                let wi = w.index();

                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = w.index();

            for &v in &predecessors[wi] {
                let vi = v.index();
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for score in &mut cb {
            *score *= scale;
        }
    }

    Ok(super::to_ecli_map(g, &cb))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

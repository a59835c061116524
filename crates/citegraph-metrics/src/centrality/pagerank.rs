//! PageRank over the directed citation graph.
//!
//! # Overview
//!
//! PageRank models a reader following citations at random: with
//! probability `d` they follow an outgoing citation of the current case,
//! otherwise they jump to a uniformly random case. The stationary
//! distribution of that walk scores cases by how often the reader lands
//! on them.
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / out_degree(u)   for each u → v
//! ```
//!
//! Dangling cases (no outgoing citations) redistribute their mass
//! uniformly over the whole graph, which keeps the scores summing to 1.

#![allow(clippy::cast_precision_loss)]

use citegraph_core::CitationGraph;
use tracing::instrument;

use crate::centrality::MetricResult;
use crate::error::MetricError;

/// Configuration for PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a citation vs jumping).
    /// Default: 0.85.
    pub damping: f64,
    /// Convergence threshold: stop when the L1 norm of the rank delta is
    /// below this value. Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations. Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

/// Compute PageRank with the default configuration.
///
/// # Errors
///
/// [`MetricError::NotConverged`] if the iteration cap is hit first.
#[instrument(skip(g))]
pub fn pagerank(g: &CitationGraph) -> MetricResult {
    pagerank_with(g, &PageRankConfig::default())
}

/// Compute PageRank with an explicit configuration.
///
/// # Errors
///
/// [`MetricError::NotConverged`] if the iteration cap is hit first.
pub fn pagerank_with(g: &CitationGraph, config: &PageRankConfig) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(super::MetricMap::new());
    }

    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;

    let out_degree: Vec<usize> = g.nodes().map(|v| g.outgoing(v).count()).collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    for _ in 0..config.max_iter {
        for r in &mut new_ranks {
            *r = base;
        }

        for node in g.nodes() {
            let idx = node.index();
            if out_degree[idx] == 0 {
                // Dangling case: its mass spreads over the whole graph.
                let share = config.damping * ranks[idx] / n_f64;
                for r in &mut new_ranks {
                    *r += share;
                }
            } else {
                let share = config.damping * ranks[idx] / out_degree[idx] as f64;
                for neighbor in g.outgoing(node) {
                    new_ranks[neighbor.index()] += share;
                }
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            return Ok(super::to_ecli_map(g, &ranks));
        }
    }

    Err(MetricError::NotConverged {
        iterations: config.max_iter,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Trophic levels over the citation hierarchy.
//!
//! # Overview
//!
//! Borrowed from food-web analysis: cases that nothing in the set cites
//! form the base layer at level 1, and every other case sits one step
//! above the average of the cases citing it:
//!
//! ```text
//! level(v) = 1                                   if in_degree(v) = 0
//! level(v) = 1 + mean(level(u)) over all u → v   otherwise
//! ```
//!
//! The recursion is only well defined on an acyclic graph. Citation
//! networks are acyclic in principle (a judgement cannot cite its own
//! future), but registry corrections and joined cases do produce the odd
//! cycle, so cyclicity is surfaced as [`MetricError::GraphNotAcyclic`]
//! with one of the offending cases named, rather than looping or
//! guessing.

#![allow(clippy::cast_precision_loss)]

use citegraph_core::CitationGraph;
use petgraph::algo::toposort;
use tracing::instrument;

use crate::centrality::MetricResult;
use crate::error::MetricError;

/// Compute the trophic level of every case.
///
/// # Errors
///
/// [`MetricError::GraphNotAcyclic`] when the citation graph contains a
/// cycle; the error names one case on it.
#[instrument(skip(g))]
pub fn trophic_level(g: &CitationGraph) -> MetricResult {
    let n = g.node_count();
    if n == 0 {
        return Ok(super::MetricMap::new());
    }

    let order = toposort(g.digraph(), None).map_err(|cycle| {
        let member = cycle.node_id();
        MetricError::GraphNotAcyclic {
            cycle_member: g.ecli(member).unwrap_or_default().to_string(),
        }
    })?;

    // Topological order guarantees every citer is levelled before the
    // cases it cites.
    let mut levels = vec![0.0_f64; n];
    for v in order {
        let incoming: Vec<f64> = g.incoming(v).map(|u| levels[u.index()]).collect();
        levels[v.index()] = if incoming.is_empty() {
            1.0
        } else {
            1.0 + incoming.iter().sum::<f64>() / incoming.len() as f64
        };
    }

    Ok(super::to_ecli_map(g, &levels))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

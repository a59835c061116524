//! Error taxonomy for metric computation.
//!
//! Data-integrity problems never reach this layer (the builder skips and
//! counts them); what remains is either a structural precondition the
//! graph violates or an iterative method that failed to converge. Both
//! abort only the metric that raised them.

use thiserror::Error;

/// A metric-level failure. The engine degrades the affected column to
/// uncomputed and lets every other metric proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    /// The measure requires a DAG and the graph contains a directed cycle.
    /// The recursive trophic-level definition is ill-posed on cycles, so
    /// this is surfaced instead of returning silently wrong levels.
    #[error("graph is not acyclic: cycle through {cycle_member}")]
    GraphNotAcyclic {
        /// ECLI of a node on the detected cycle.
        cycle_member: String,
    },

    /// Power iteration hit its iteration cap before the tolerance was met.
    #[error("iteration did not converge within {iterations} iterations")]
    NotConverged {
        /// Number of iterations performed before giving up.
        iterations: usize,
    },
}

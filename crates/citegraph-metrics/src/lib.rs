#![forbid(unsafe_code)]
//! citegraph-metrics library.
//!
//! Structural importance measures over a frozen
//! [`citegraph_core::CitationGraph`]: the centrality panel, the triadic
//! disruption index, the metric registry/engine with per-measure fault
//! isolation, and the metrics-table assembler consumed by the downstream
//! correlation layer.
//!
//! # Conventions
//!
//! - **Errors**: Each measure returns `Result<_, MetricError>`. Structural
//!   precondition violations (cyclic graph for trophic levels) and
//!   numerical non-convergence are surfaced as errors; the engine converts
//!   them into uncomputed columns instead of aborting the run.
//! - **Uncomputed values**: `f64::NAN`, never a silently dropped row.
//! - **Logging**: Use `tracing` macros; per-metric timing is recorded by
//!   the engine around each invocation, not inside the algorithms.

pub mod centrality;
pub mod composite;
pub mod disruption;
pub mod engine;
pub mod error;
pub mod table;

pub use centrality::{MetricMap, MetricResult};
pub use composite::append_composite_score;
pub use disruption::disruption;
pub use engine::{EngineReport, MetricOutcome, MetricRegistry};
pub use error::MetricError;
pub use table::{MetricsRow, MetricsTable};

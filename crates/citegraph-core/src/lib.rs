#![forbid(unsafe_code)]
//! citegraph-core library.
//!
//! Case records, the ECLI identifier index, and citation-graph construction
//! with integrity filtering. The graph produced here is the immutable input
//! to every structural metric in `citegraph-metrics`.
//!
//! # Conventions
//!
//! - **Errors**: Data-integrity problems (empty/duplicate identifiers,
//!   dangling references, self-citations) are recovered by skipping the
//!   offending row and counting it in [`graph::IngestStats`]. They are never
//!   fatal to graph construction.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod graph;
pub mod index;
pub mod record;

pub use graph::{CitationGraph, GraphStats, IngestStats};
pub use index::EcliIndex;
pub use record::{Branch, CaseRecord, CitationRecord, remove_communicated_cases};

//! Citation graph construction and summary statistics.
//!
//! # Overview
//!
//! This module turns case and citation records into a petgraph-based
//! directed graph with the integrity guarantees the metrics layer relies
//! on: unique identifiers, no self-loops, and no dangling edge endpoints.
//!
//! ## Pipeline
//!
//! ```text
//! &[CaseRecord] + &[CitationRecord]
//!        ↓  build::CitationGraph::build()
//! CitationGraph (frozen: DiGraph + EcliIndex + IngestStats + fingerprint)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, component count, isolated nodes, …)
//! ```
//!
//! An edge `A → B` means "A cites B". The graph is read-only after
//! construction; every centrality measure and the disruption pass consume
//! it through shared references.

pub mod build;
pub mod stats;

pub use build::{CitationGraph, IngestStats};
pub use stats::GraphStats;

//! ECLI identifier index.
//!
//! Bidirectional mapping between a case's ECLI and its node handle in the
//! citation graph. Built in one pass during the builder's node phase and
//! pure-lookup afterward; edge resolution depends on the index being
//! complete, which is why node ingestion finishes before any edge is
//! considered.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use tracing::warn;

/// Lookup structure from ECLI to graph node handle.
///
/// Construction enforces the identifier invariants: empty and duplicate
/// ECLIs are rejected by [`EcliIndex::register`] (the caller counts the
/// rejection and skips the row).
#[derive(Debug, Default, Clone)]
pub struct EcliIndex {
    map: HashMap<String, NodeIndex>,
}

impl EcliIndex {
    /// Empty index with room for `capacity` identifiers.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Register an identifier for a node handle.
    ///
    /// Returns `false` without mutating the index when the identifier is
    /// empty or already registered.
    pub fn register(&mut self, ecli: &str, idx: NodeIndex) -> bool {
        if ecli.is_empty() {
            warn!("node record with empty ECLI skipped");
            return false;
        }
        if self.map.contains_key(ecli) {
            warn!(ecli, "duplicate ECLI skipped");
            return false;
        }
        self.map.insert(ecli.to_string(), idx);
        true
    }

    /// Resolve an ECLI to its node handle.
    #[must_use]
    pub fn resolve(&self, ecli: &str) -> Option<NodeIndex> {
        self.map.get(ecli).copied()
    }

    /// Number of registered identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(ecli, node)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeIndex)> {
        self.map.iter().map(|(ecli, &idx)| (ecli.as_str(), idx))
    }
}

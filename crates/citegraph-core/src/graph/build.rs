//! Citation graph construction from case and citation records.
//!
//! # Overview
//!
//! Two-phase build: all node records are ingested first so the
//! [`EcliIndex`] is complete, then citation records are resolved against
//! it. Dangling references (the dominant error path in the source data,
//! where cases cite judgements outside the collected set), self-citations,
//! and duplicate ordered pairs are skipped and counted, never fatal.
//!
//! ## Edge Direction
//!
//! An edge `A → B` in the graph means "A **cites** B". A citation record
//! `{ citing: A, cited: [B, C] }` inserts edges `A → B` and `A → C`.
//!
//! ## Fingerprint
//!
//! The graph carries a BLAKE3 hash of the sorted edge set. Two builds over
//! the same input records produce identical fingerprints; downstream
//! consumers can compare it to detect that a stored metrics table refers
//! to a different graph.

#![allow(clippy::module_name_repetitions)]

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::index::EcliIndex;
use crate::record::{CaseRecord, CitationRecord};

// ---------------------------------------------------------------------------
// IngestStats
// ---------------------------------------------------------------------------

/// Counts of rows skipped during graph construction, by reason.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Node records with an empty ECLI.
    pub empty_id: usize,
    /// Node records whose ECLI was already registered.
    pub duplicate_id: usize,
    /// Citation references whose citing or cited ECLI did not resolve.
    pub dangling_edges: usize,
    /// References where a case cited itself.
    pub self_citations: usize,
    /// References repeating an already-inserted ordered pair.
    pub duplicate_edges: usize,
}

impl IngestStats {
    /// Total number of skipped rows across all reasons.
    #[must_use]
    pub const fn total_skipped(&self) -> usize {
        self.empty_id
            + self.duplicate_id
            + self.dangling_edges
            + self.self_citations
            + self.duplicate_edges
    }
}

// ---------------------------------------------------------------------------
// CitationGraph
// ---------------------------------------------------------------------------

/// A directed citation graph over case records.
///
/// Nodes carry the full [`CaseRecord`]; an edge `A → B` means "A cites B".
/// Frozen after [`CitationGraph::build`]: all access goes through shared
/// references and no mutating method is exposed.
#[derive(Debug, Clone)]
pub struct CitationGraph {
    graph: DiGraph<CaseRecord, ()>,
    index: EcliIndex,
    stats: IngestStats,
    fingerprint: String,
}

impl CitationGraph {
    /// Build a citation graph from node and citation records.
    ///
    /// Node phase: every record with a non-empty, unused ECLI becomes a
    /// node; the rest are counted in [`IngestStats`]. Edge phase: each
    /// cited ECLI is resolved through the completed index, skipping
    /// dangling references, self-citations, and duplicate pairs. A final
    /// self-loop sweep runs after insertion as an idempotent integrity
    /// double-check.
    #[must_use]
    #[instrument(skip(nodes, citations))]
    pub fn build(nodes: &[CaseRecord], citations: &[CitationRecord]) -> Self {
        let mut graph = DiGraph::<CaseRecord, ()>::with_capacity(nodes.len(), citations.len());
        let mut index = EcliIndex::with_capacity(nodes.len());
        let mut stats = IngestStats::default();

        for record in nodes {
            let idx = graph.add_node(record.clone());
            if !index.register(&record.ecli, idx) {
                // register() already logged the reason.
                if record.ecli.is_empty() {
                    stats.empty_id += 1;
                } else {
                    stats.duplicate_id += 1;
                }
                graph.remove_node(idx);
            }
        }

        let mut edges: Vec<(String, String)> = Vec::new();
        for citation in citations {
            let Some(citing) = index.resolve(&citation.citing) else {
                debug!(citing = %citation.citing, "unresolved citing ECLI, references skipped");
                stats.dangling_edges += citation.cited.len();
                continue;
            };
            for target in &citation.cited {
                let Some(cited) = index.resolve(target) else {
                    debug!(cited = %target, "unresolved cited ECLI, reference skipped");
                    stats.dangling_edges += 1;
                    continue;
                };
                if citing == cited {
                    stats.self_citations += 1;
                    continue;
                }
                if graph.contains_edge(citing, cited) {
                    stats.duplicate_edges += 1;
                    continue;
                }
                graph.add_edge(citing, cited, ());
                edges.push((citation.citing.clone(), target.clone()));
            }
        }

        // Integrity sweep: no self-loop can survive construction. Skipping
        // self-citations above already guarantees this; the sweep keeps the
        // invariant local to the finished graph and is idempotent.
        graph.retain_edges(|g, e| g.edge_endpoints(e).is_some_and(|(a, b)| a != b));

        let fingerprint = compute_fingerprint(&mut edges);

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            skipped = stats.total_skipped(),
            "citation graph built"
        );

        Self {
            graph,
            index,
            stats,
            fingerprint,
        }
    }

    /// Number of cases in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of citation edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Resolve an ECLI to its node handle.
    #[must_use]
    pub fn resolve(&self, ecli: &str) -> Option<NodeIndex> {
        self.index.resolve(ecli)
    }

    /// ECLI of a node.
    #[must_use]
    pub fn ecli(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|r| r.ecli.as_str())
    }

    /// Full case record of a node.
    #[must_use]
    pub fn case(&self, idx: NodeIndex) -> Option<&CaseRecord> {
        self.graph.node_weight(idx)
    }

    /// Iterate over all node handles.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Iterate over all edges as `(citing, cited)` handle pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        use petgraph::visit::EdgeRef;
        self.graph.edge_references().map(|e| (e.source(), e.target()))
    }

    /// Direct predecessors of a node (cases that cite it).
    pub fn incoming(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    /// Direct successors of a node (cases it cites).
    pub fn outgoing(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    /// Whether the directed edge `citing → cited` exists.
    #[must_use]
    pub fn has_edge(&self, citing: NodeIndex, cited: NodeIndex) -> bool {
        self.graph.find_edge(citing, cited).is_some()
    }

    /// The underlying petgraph structure, for algorithms that take a
    /// graph reference directly (topological sort, component counting).
    #[must_use]
    pub const fn digraph(&self) -> &DiGraph<CaseRecord, ()> {
        &self.graph
    }

    /// Rows skipped during construction, by reason.
    #[must_use]
    pub const fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// BLAKE3 hash of the sorted edge set.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// BLAKE3 over the sorted `(citing, cited)` ECLI pairs, so the value is
/// independent of record order in the input.
fn compute_fingerprint(edges: &mut [(String, String)]) -> String {
    edges.sort_unstable();
    let mut hasher = blake3::Hasher::new();
    for (citing, cited) in edges {
        hasher.update(citing.as_bytes());
        hasher.update(b"\x00");
        hasher.update(cited.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn node(ecli: &str) -> CaseRecord {
        CaseRecord::with_ecli(ecli)
    }

    fn cites(citing: &str, cited: &[&str]) -> CitationRecord {
        CitationRecord {
            citing: citing.to_string(),
            cited: cited.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn empty_input_builds_empty_graph() {
        let g = CitationGraph::build(&[], &[]);
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.fingerprint().starts_with("blake3:"));
    }

    #[test]
    fn nodes_without_citations_are_isolated() {
        let g = CitationGraph::build(&[node("E1"), node("E2")], &[]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(g.resolve("E1").is_some());
        assert!(g.resolve("E2").is_some());
    }

    #[test]
    fn citation_direction_is_citing_to_cited() {
        let g = CitationGraph::build(&[node("E1"), node("E2")], &[cites("E1", &["E2"])]);

        let a = g.resolve("E1").expect("E1 node");
        let b = g.resolve("E2").expect("E2 node");
        assert!(g.has_edge(a, b), "expected E1 → E2");
        assert!(!g.has_edge(b, a), "no reverse edge");
    }

    #[test]
    fn dangling_references_skipped_and_counted() {
        let g = CitationGraph::build(
            &[node("E1"), node("E2")],
            &[
                cites("E1", &["E2", "ECLI:XX:MISSING"]),
                cites("ECLI:XX:UNKNOWN", &["E1", "E2"]),
            ],
        );

        assert_eq!(g.edge_count(), 1);
        // One unresolved target plus both targets of the unknown citer.
        assert_eq!(g.stats().dangling_edges, 3);
    }

    #[test]
    fn self_citations_skipped() {
        let g = CitationGraph::build(&[node("E1"), node("E2")], &[cites("E1", &["E1", "E2"])]);

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.stats().self_citations, 1);
        for (a, b) in g.edges() {
            assert_ne!(a, b, "self-loop survived the sweep");
        }
    }

    #[test]
    fn duplicate_edges_collapse_to_one() {
        let g = CitationGraph::build(
            &[node("E1"), node("E2")],
            &[cites("E1", &["E2", "E2"]), cites("E1", &["E2"])],
        );

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.stats().duplicate_edges, 2);
    }

    #[test]
    fn duplicate_node_ids_keep_first_record() {
        let mut second = node("E1");
        second.importance = Some(1);

        let g = CitationGraph::build(&[node("E1"), second], &[]);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.stats().duplicate_id, 1);

        let idx = g.resolve("E1").expect("E1 node");
        assert_eq!(g.case(idx).expect("record").importance, None);
    }

    #[test]
    fn empty_node_ids_skipped() {
        let g = CitationGraph::build(&[node(""), node("E1")], &[]);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.stats().empty_id, 1);
    }

    #[test]
    fn every_edge_endpoint_is_a_member() {
        let g = CitationGraph::build(
            &[node("E1"), node("E2"), node("E3")],
            &[cites("E1", &["E2", "E3"]), cites("E2", &["E3", "E9"])],
        );

        for (a, b) in g.edges() {
            assert!(g.case(a).is_some());
            assert!(g.case(b).is_some());
        }
    }

    #[test]
    fn rebuild_is_idempotent() {
        let nodes = [node("E1"), node("E2"), node("E3")];
        let citations = [cites("E1", &["E2"]), cites("E2", &["E3", "E1"])];

        let first = CitationGraph::build(&nodes, &citations);
        let second = CitationGraph::build(&nodes, &citations);

        assert_eq!(first.node_count(), second.node_count());
        assert_eq!(first.edge_count(), second.edge_count());
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn fingerprint_ignores_citation_record_order() {
        let nodes = [node("E1"), node("E2"), node("E3")];
        let forward = CitationGraph::build(
            &nodes,
            &[cites("E1", &["E2"]), cites("E2", &["E3"])],
        );
        let reversed = CitationGraph::build(
            &nodes,
            &[cites("E2", &["E3"]), cites("E1", &["E2"])],
        );
        assert_eq!(forward.fingerprint(), reversed.fingerprint());
    }

    #[test]
    fn fingerprint_changes_with_edges() {
        let nodes = [node("E1"), node("E2")];
        let without = CitationGraph::build(&nodes, &[]);
        let with = CitationGraph::build(&nodes, &[cites("E1", &["E2"])]);
        assert_ne!(without.fingerprint(), with.fingerprint());
    }

    proptest! {
        #[test]
        fn built_graphs_are_simple_and_closed(
            edges in proptest::collection::vec((0usize..8, 0usize..8), 0..40)
        ) {
            let nodes: Vec<CaseRecord> = (0..8).map(|i| node(&format!("E{i}"))).collect();
            let citations: Vec<CitationRecord> = edges
                .iter()
                .map(|(a, b)| CitationRecord {
                    citing: format!("E{a}"),
                    cited: vec![format!("E{b}")],
                })
                .collect();

            let g = CitationGraph::build(&nodes, &citations);

            let mut seen = std::collections::HashSet::new();
            for (a, b) in g.edges() {
                prop_assert_ne!(a, b);
                prop_assert!(g.case(a).is_some() && g.case(b).is_some());
                prop_assert!(seen.insert((a, b)), "duplicate edge");
            }

            let again = CitationGraph::build(&nodes, &citations);
            prop_assert_eq!(g.fingerprint(), again.fingerprint());
        }
    }
}

//! Metric registry and concurrent execution engine.
//!
//! # Overview
//!
//! The engine owns the list of measures to run against a frozen
//! [`CitationGraph`] and the policy for running them:
//!
//! - Measures are independent, so they run on scoped threads, one per
//!   registry entry.
//! - A failing measure (non-convergence, cyclic graph) is recorded and
//!   the rest continue. The table assembler turns failed entries into
//!   uncomputed columns, so a run always produces a full-width table.
//! - Wall-clock time per measure is captured around each invocation and
//!   logged; the slow solvers (current-flow on big components) are the
//!   usual suspects when a run drags.
//!
//! A registry entry can emit more than one output column: HITS computes
//! hub and authority scores in a single pass and publishes both.

use std::time::{Duration, Instant};

use citegraph_core::CitationGraph;
use tracing::{info, instrument, warn};

use crate::centrality::{
    self, MetricMap, betweenness_centrality, closeness_centrality, core_number,
    current_flow_betweenness, current_flow_closeness, degree_centrality, eigenvector_centrality,
    forest_closeness, harmonic_centrality, hits, in_degree_centrality, out_degree_centrality,
    pagerank, relative_in_degree, trophic_level,
};
use crate::disruption::disruption;
use crate::error::MetricError;

/// Named score columns produced by one measure, in publication order.
pub type MetricColumns = Vec<(&'static str, MetricMap)>;

type MetricFn = Box<dyn Fn(&CitationGraph) -> Result<MetricColumns, MetricError> + Send + Sync>;

/// One registered measure: a name, the columns it publishes, and the
/// function that computes them.
pub struct MetricEntry {
    name: &'static str,
    columns: Vec<&'static str>,
    run: MetricFn,
}

impl MetricEntry {
    /// A measure publishing a single column under its own name.
    fn single(
        name: &'static str,
        f: fn(&CitationGraph) -> centrality::MetricResult,
    ) -> Self {
        Self {
            name,
            columns: vec![name],
            run: Box::new(move |g| Ok(vec![(name, f(g)?)])),
        }
    }
}

impl std::fmt::Debug for MetricEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricEntry")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// The result of running one measure, timed.
#[derive(Debug)]
pub struct MetricOutcome {
    /// Registry name of the measure.
    pub metric: &'static str,
    /// Columns the measure publishes, whether or not it succeeded.
    pub columns: Vec<&'static str>,
    /// Wall-clock time of the invocation.
    pub elapsed: Duration,
    /// Scores per column, or the failure that voided them.
    pub result: Result<MetricColumns, MetricError>,
}

/// All outcomes of one engine run, in registry order.
#[derive(Debug)]
pub struct EngineReport {
    pub outcomes: Vec<MetricOutcome>,
}

impl EngineReport {
    /// Names of measures that failed, in registry order.
    #[must_use]
    pub fn failed(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.metric)
            .collect()
    }

    /// Every published column name, in registry order, including the
    /// columns of failed measures.
    #[must_use]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .flat_map(|o| o.columns.iter().copied())
            .collect()
    }

    /// Look up the scores for one column, `None` if its measure failed.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&MetricMap> {
        self.outcomes.iter().find_map(|o| {
            o.result
                .as_ref()
                .ok()?
                .iter()
                .find(|(column, _)| *column == name)
                .map(|(_, scores)| scores)
        })
    }
}

/// Ordered collection of measures to run.
pub struct MetricRegistry {
    entries: Vec<MetricEntry>,
}

impl MetricRegistry {
    /// The full standard panel, in its canonical column order.
    #[must_use]
    pub fn standard() -> Self {
        let entries = vec![
            MetricEntry::single("degree_centrality", degree_centrality),
            MetricEntry::single("in_degree_centrality", in_degree_centrality),
            MetricEntry::single("core_number", core_number),
            MetricEntry::single("relative_in_degree_centrality", relative_in_degree),
            MetricEntry::single("eigenvector_centrality", eigenvector_centrality),
            MetricEntry::single("pagerank", pagerank),
            MetricEntry::single("current_flow_betweenness_centrality", current_flow_betweenness),
            MetricEntry::single("forest_closeness_centrality", forest_closeness),
            MetricEntry {
                name: "hits",
                columns: vec!["hub_centrality", "authority_centrality"],
                run: Box::new(|g| {
                    let (hubs, authorities) = hits(g)?;
                    Ok(vec![
                        ("hub_centrality", hubs),
                        ("authority_centrality", authorities),
                    ])
                }),
            },
            MetricEntry::single("trophic_level", trophic_level),
            MetricEntry::single("betweenness_centrality", betweenness_centrality),
            MetricEntry::single("current_flow_closeness_centrality", current_flow_closeness),
            MetricEntry::single("out_degree_centrality", out_degree_centrality),
            MetricEntry::single("harmonic_centrality", harmonic_centrality),
            MetricEntry::single("disruption", disruption),
            MetricEntry::single("closeness_centrality", closeness_centrality),
        ];
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered measure names, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    /// Run every registered measure against `g` on scoped threads.
    ///
    /// Failures are captured per measure; the report always covers the
    /// whole registry.
    ///
    /// # Panics
    ///
    /// Propagates a panic from a measure thread. The measures are pure
    /// functions, so a panic is a bug rather than a data condition.
    #[instrument(skip_all, fields(measures = self.entries.len()))]
    pub fn run(&self, g: &CitationGraph) -> EngineReport {
        let outcomes = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .entries
                .iter()
                .map(|entry| {
                    scope.spawn(move || {
                        let started = Instant::now();
                        let result = (entry.run)(g);
                        let elapsed = started.elapsed();

                        match &result {
                            Ok(_) => {
                                info!(metric = entry.name, ?elapsed, "measure computed");
                            }
                            Err(error) => {
                                warn!(metric = entry.name, ?elapsed, %error, "measure failed");
                            }
                        }

                        MetricOutcome {
                            metric: entry.name,
                            columns: entry.columns.clone(),
                            elapsed,
                            result,
                        }
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().expect("measure thread panicked"))
                .collect()
        });

        EngineReport { outcomes }
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Metrics-table assembly.
//!
//! # Overview
//!
//! The final product of a run: one row per case joining the identity and
//! label fields from the case record with every metric column the engine
//! published, in registry order. Downstream correlation and regression
//! consume this table; nothing in this crate interprets it further.
//!
//! Missing values are explicit. A case absent from a measure's output,
//! or any column of a failed measure, appears as NaN in its cell rather
//! than dropping the row or the column. The table is always full width
//! and full height.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use citegraph_core::{Branch, CitationGraph};
use serde::Serialize;
use tracing::{info, instrument};

use crate::engine::EngineReport;

/// One case with its label fields and metric values.
///
/// `values` is parallel to the owning table's `metric_names`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsRow {
    pub ecli: String,
    pub judgement_date: Option<NaiveDate>,
    pub importance: Option<u8>,
    pub branch: Branch,
    /// Additional source attributes, carried through unchanged from the
    /// case record and flattened into the serialized row.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
    pub values: Vec<f64>,
}

/// The joined metrics table for one engine run.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsTable {
    /// Column names, in registry order.
    pub metric_names: Vec<String>,
    /// One row per case, in graph node order.
    pub rows: Vec<MetricsRow>,
    /// Measures whose columns are wholly uncomputed this run.
    pub failed_metrics: Vec<String>,
}

impl MetricsTable {
    /// Join the engine report with the case records of `g`.
    #[must_use]
    #[instrument(skip_all, fields(cases = g.node_count()))]
    pub fn assemble(g: &CitationGraph, report: &EngineReport) -> Self {
        let metric_names: Vec<String> = report
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let columns: Vec<Option<&crate::MetricMap>> = report
            .column_names()
            .into_iter()
            .map(|name| report.column(name))
            .collect();

        let rows: Vec<MetricsRow> = g
            .nodes()
            .filter_map(|idx| {
                let record = g.case(idx)?;
                let values: Vec<f64> = columns
                    .iter()
                    .map(|column| {
                        column
                            .and_then(|scores| scores.get(&record.ecli))
                            .copied()
                            .unwrap_or(f64::NAN)
                    })
                    .collect();
                Some(MetricsRow {
                    ecli: record.ecli.clone(),
                    judgement_date: record.judgement_date,
                    importance: record.importance,
                    branch: record.branch.clone(),
                    extra: record.extra.clone(),
                    values,
                })
            })
            .collect();

        let failed_metrics: Vec<String> =
            report.failed().into_iter().map(str::to_string).collect();

        info!(
            rows = rows.len(),
            columns = metric_names.len(),
            failed = failed_metrics.len(),
            "metrics table assembled"
        );

        Self {
            metric_names,
            rows,
            failed_metrics,
        }
    }

    /// Position of a metric column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.metric_names.iter().position(|n| n == name)
    }

    /// Value of one metric for one case.
    #[must_use]
    pub fn value(&self, ecli: &str, metric: &str) -> Option<f64> {
        let column = self.column_index(metric)?;
        self.rows
            .iter()
            .find(|row| row.ecli == ecli)
            .and_then(|row| row.values.get(column))
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

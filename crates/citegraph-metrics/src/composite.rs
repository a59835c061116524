//! Composite importance score.
//!
//! # Overview
//!
//! A single importance proxy per case: each metric column is min-max
//! normalized to `[0, 1]` so the wildly different scales (core numbers,
//! unit-sum PageRank, `[-1, 1]` disruption) contribute equally, then each
//! row averages its **defined** normalized values. Uncomputed cells are
//! skipped, not zeroed; a case with no defined metrics at all gets a NaN
//! composite. Constant columns, including columns whose only spread is
//! floating-point jitter, carry no ranking information and are skipped
//! entirely.
//!
//! The result is appended to the table as the `composite_score` column.

#![allow(clippy::cast_precision_loss)]

use tracing::instrument;

use crate::table::MetricsTable;

/// Column name of the appended composite.
pub const COMPOSITE_COLUMN: &str = "composite_score";

/// Append the composite score column to `table`.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn append_composite_score(table: &mut MetricsTable) {
    let width = table.metric_names.len();

    // Per-column finite ranges; a None range marks a column to skip.
    let ranges: Vec<Option<(f64, f64)>> = (0..width)
        .map(|col| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for row in &table.rows {
                let v = row.values[col];
                if v.is_finite() {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
            // A spread at float-rounding scale (pseudo-inverse jitter on
            // symmetric graphs) is noise, not ranking information, and
            // min-max scaling would blow it up to the full unit interval.
            let spread = max - min;
            (spread > 1e-9 * max.abs().max(1.0)).then_some((min, max))
        })
        .collect();

    for row in &mut table.rows {
        let mut sum = 0.0;
        let mut defined = 0usize;
        for (col, range) in ranges.iter().enumerate() {
            let Some((min, max)) = range else { continue };
            let v = row.values[col];
            if v.is_finite() {
                sum += (v - min) / (max - min);
                defined += 1;
            }
        }
        let composite = if defined > 0 {
            sum / defined as f64
        } else {
            f64::NAN
        };
        row.values.push(composite);
    }

    table.metric_names.push(COMPOSITE_COLUMN.to_string());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::testutil::graph_from_edges;
    use crate::engine::MetricRegistry;

    fn table_for(edges: &[(&str, &str)]) -> MetricsTable {
        let g = graph_from_edges(edges);
        let report = MetricRegistry::standard().run(&g);
        MetricsTable::assemble(&g, &report)
    }

    #[test]
    fn composite_column_is_appended() {
        let mut table = table_for(&[("A", "B"), ("B", "C")]);
        let width = table.metric_names.len();

        append_composite_score(&mut table);

        assert_eq!(table.metric_names.len(), width + 1);
        assert_eq!(table.metric_names.last().map(String::as_str), Some(COMPOSITE_COLUMN));
        for row in &table.rows {
            assert_eq!(row.values.len(), width + 1);
        }
    }

    #[test]
    fn composite_stays_in_unit_interval() {
        let mut table = table_for(&[("A", "B"), ("B", "C"), ("A", "C"), ("C", "D")]);
        append_composite_score(&mut table);

        for row in &table.rows {
            let score = row.values.last().copied().expect("composite");
            if score.is_nan() {
                continue;
            }
            assert!((0.0..=1.0).contains(&score), "{} = {score}", row.ecli);
        }
    }

    #[test]
    fn heavily_cited_sink_outranks_pure_citer() {
        let mut table = table_for(&[("A", "D"), ("B", "D"), ("C", "D"), ("A", "B")]);
        append_composite_score(&mut table);

        let sink = table.value("D", COMPOSITE_COLUMN).expect("D");
        let citer = table.value("C", COMPOSITE_COLUMN).expect("C");
        assert!(sink > citer, "sink {sink} vs citer {citer}");
    }

    #[test]
    fn uncomputed_cells_are_skipped_not_zeroed() {
        // The cycle voids trophic level; composites must still be defined
        // from the remaining columns.
        let mut table = table_for(&[("A", "B"), ("B", "A"), ("C", "A")]);
        append_composite_score(&mut table);

        for ecli in ["A", "B", "C"] {
            let score = table.value(ecli, COMPOSITE_COLUMN).expect("composite");
            assert!(!score.is_nan(), "{ecli} composite should be defined");
        }
    }

    #[test]
    fn jitter_wide_columns_are_skipped() {
        use std::collections::BTreeMap;

        use citegraph_core::Branch;

        use crate::table::MetricsRow;

        let row = |ecli: &str, values: Vec<f64>| MetricsRow {
            ecli: ecli.to_string(),
            judgement_date: None,
            importance: None,
            branch: Branch::default(),
            extra: BTreeMap::new(),
            values,
        };

        // The first column's spread is one rounding step, the kind the
        // Laplacian pseudo-inverse produces on symmetric graphs. Only the
        // second column may contribute to the composite.
        let mut table = MetricsTable {
            metric_names: vec!["noisy".to_string(), "informative".to_string()],
            rows: vec![
                row("X", vec![1.0, 0.0]),
                row("Y", vec![1.0 + 2e-16, 1.0]),
            ],
            failed_metrics: Vec::new(),
        };
        append_composite_score(&mut table);

        let x = table.value("X", COMPOSITE_COLUMN).expect("X");
        let y = table.value("Y", COMPOSITE_COLUMN).expect("Y");
        assert!((x - 0.0).abs() < f64::EPSILON, "X = {x}");
        assert!((y - 1.0).abs() < f64::EPSILON, "Y = {y}");
    }

    #[test]
    fn constant_columns_carry_no_weight() {
        // On a perfectly symmetric 2-cycle every defined column is
        // constant, leaving nothing to rank: both composites agree.
        let mut table = table_for(&[("A", "B"), ("B", "A")]);
        append_composite_score(&mut table);

        let a = table.value("A", COMPOSITE_COLUMN).expect("A");
        let b = table.value("B", COMPOSITE_COLUMN).expect("B");
        assert!((a - b).abs() < 1e-9 || (a.is_nan() && b.is_nan()));
    }
}

//! Case and citation records consumed by the graph builder.
//!
//! These are the two input record shapes produced by the external ingestion
//! layer: one row per case, and one row per citing case listing everything
//! it cites. Both derive `serde` so collaborators can feed them straight
//! from decoded JSON without an intermediate conversion step.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// Docket branch of a case, a small closed set of categories.
///
/// Unknown labels are preserved verbatim in [`Branch::Other`] so no input
/// row is rejected over an unrecognized branch string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Branch {
    Chamber,
    GrandChamber,
    Committee,
    Admissibility,
    CommunicatedCases,
    Other(String),
}

impl Branch {
    /// Canonical uppercase label as found in the source data.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chamber => "CHAMBER",
            Self::GrandChamber => "GRANDCHAMBER",
            Self::Committee => "COMMITTEE",
            Self::Admissibility => "ADMISSIBILITY",
            Self::CommunicatedCases => "COMMUNICATEDCASES",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for Branch {
    fn from(label: String) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "CHAMBER" => Self::Chamber,
            "GRANDCHAMBER" => Self::GrandChamber,
            "COMMITTEE" => Self::Committee,
            "ADMISSIBILITY" => Self::Admissibility,
            "COMMUNICATEDCASES" => Self::CommunicatedCases,
            _ => Self::Other(label),
        }
    }
}

impl From<Branch> for String {
    fn from(branch: Branch) -> Self {
        branch.as_str().to_string()
    }
}

impl Default for Branch {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

// ---------------------------------------------------------------------------
// CaseRecord
// ---------------------------------------------------------------------------

/// One case, identified by its ECLI.
///
/// Identity and label fields are fixed at ingestion; any additional source
/// columns ride along unchanged in `extra` and reappear untouched in the
/// metrics table's identity section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// European Case Law Identifier. The primary join key throughout.
    #[serde(alias = "ECLI")]
    pub ecli: String,
    /// Date of judgement, when the source row carries one.
    #[serde(default, alias = "judgementdate")]
    pub judgement_date: Option<NaiveDate>,
    /// Ordinal importance label, 1–4, lower = more important.
    /// `None` (or 0 in the source) means not assessed.
    #[serde(default, deserialize_with = "de_importance")]
    pub importance: Option<u8>,
    /// Docket branch of the case.
    #[serde(default, alias = "doctypebranch")]
    pub branch: Branch,
    /// Remaining source columns, carried through unchanged.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CaseRecord {
    /// Minimal record with only an identifier, for tests and synthetic graphs.
    #[must_use]
    pub fn with_ecli(ecli: &str) -> Self {
        Self {
            ecli: ecli.to_string(),
            judgement_date: None,
            importance: None,
            branch: Branch::default(),
            extra: BTreeMap::new(),
        }
    }
}

/// The source encodes "importance not assessed" as 0; fold it into `None`.
fn de_importance<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<u8>::deserialize(deserializer)?;
    Ok(raw.filter(|&v| v != 0))
}

// ---------------------------------------------------------------------------
// CitationRecord
// ---------------------------------------------------------------------------

/// One citing case and the list of cases it cites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    /// ECLI of the citing case.
    #[serde(alias = "source")]
    pub citing: String,
    /// ECLIs of the cited cases.
    #[serde(alias = "targets")]
    pub cited: Vec<String>,
}

// ---------------------------------------------------------------------------
// Pre-build filtering
// ---------------------------------------------------------------------------

/// Drop communicated cases from a record set before graph construction.
///
/// Communicated cases are procedural notices, not judgements; they carry no
/// importance assessment and would only dilute the citation structure.
#[must_use]
pub fn remove_communicated_cases(mut records: Vec<CaseRecord>) -> Vec<CaseRecord> {
    let before = records.len();
    records.retain(|r| r.branch != Branch::CommunicatedCases);
    let dropped = before - records.len();
    if dropped > 0 {
        debug!(dropped, "removed communicated cases");
    }
    records
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_round_trips_known_labels() {
        for label in [
            "CHAMBER",
            "GRANDCHAMBER",
            "COMMITTEE",
            "ADMISSIBILITY",
            "COMMUNICATEDCASES",
        ] {
            let branch = Branch::from(label.to_string());
            assert_eq!(branch.as_str(), label);
            assert!(!matches!(branch, Branch::Other(_)), "known label {label}");
        }
    }

    #[test]
    fn branch_preserves_unknown_labels() {
        let branch = Branch::from("RESOLUTIONS".to_string());
        assert_eq!(branch, Branch::Other("RESOLUTIONS".to_string()));
        assert_eq!(branch.as_str(), "RESOLUTIONS");
    }

    #[test]
    fn case_record_deserializes_source_column_names() {
        let record: CaseRecord = serde_json::from_str(
            r#"{
                "ECLI": "ECLI:CE:ECHR:2001:0101JUD000000101",
                "judgementdate": "2001-01-01",
                "importance": 2,
                "doctypebranch": "GRANDCHAMBER",
                "appno": "1/01"
            }"#,
        )
        .expect("deserialize");

        assert_eq!(record.ecli, "ECLI:CE:ECHR:2001:0101JUD000000101");
        assert_eq!(
            record.judgement_date,
            NaiveDate::from_ymd_opt(2001, 1, 1)
        );
        assert_eq!(record.importance, Some(2));
        assert_eq!(record.branch, Branch::GrandChamber);
        assert_eq!(
            record.extra.get("appno"),
            Some(&serde_json::Value::String("1/01".to_string()))
        );
    }

    #[test]
    fn importance_zero_means_unassessed() {
        let record: CaseRecord =
            serde_json::from_str(r#"{"ecli": "E1", "importance": 0}"#).expect("deserialize");
        assert_eq!(record.importance, None);
    }

    #[test]
    fn citation_record_accepts_source_target_names() {
        let record: CitationRecord =
            serde_json::from_str(r#"{"source": "E1", "targets": ["E2", "E3"]}"#)
                .expect("deserialize");
        assert_eq!(record.citing, "E1");
        assert_eq!(record.cited, vec!["E2".to_string(), "E3".to_string()]);
    }

    #[test]
    fn remove_communicated_cases_filters_only_that_branch() {
        let mut communicated = CaseRecord::with_ecli("E1");
        communicated.branch = Branch::CommunicatedCases;
        let kept = CaseRecord::with_ecli("E2");

        let records = remove_communicated_cases(vec![communicated, kept.clone()]);
        assert_eq!(records, vec![kept]);
    }
}

//! Stored document domain types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::scan::ScanReport;

/// A scan report as written to the report collection
///
/// Documents are insert-only. The id is the host joined with the ingestion
/// timestamp, so two ingestions of the same host in the same microsecond
/// produce the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub host: String,
    pub report: ScanReport,
    pub ingested_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Builds a document for `host` stamped with `ingested_at`
    pub fn new(host: impl Into<String>, report: ScanReport, ingested_at: DateTime<Utc>) -> Self {
        let host = host.into();
        Self {
            id: document_id(&host, ingested_at),
            host,
            report,
            ingested_at,
        }
    }
}

/// Formats the composite identifier, e.g. `example.com_2026-10-19T08:15:02.123456Z`
pub fn document_id(host: &str, ingested_at: DateTime<Utc>) -> String {
    format!(
        "{}_{}",
        host,
        ingested_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    )
}

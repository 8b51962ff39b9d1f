//! Report store
//!
//! Stamps a terminal report with its host and ingestion time and writes it as
//! a new document. Every call inserts; nothing is updated in place.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tlsweep_core::domain::document::StoredDocument;
use tlsweep_core::domain::scan::ScanReport;
use tracing::info;

use crate::error::StoreError;
use crate::repository::ReportRepository;

pub struct ReportStore {
    reports: Arc<dyn ReportRepository>,
}

impl ReportStore {
    pub fn new(reports: Arc<dyn ReportRepository>) -> Self {
        Self { reports }
    }

    /// Persists `report` for `host`, stamped with the current UTC time
    pub async fn store(&self, report: ScanReport, host: &str) -> Result<StoredDocument, StoreError> {
        self.store_at(report, host, Utc::now()).await
    }

    /// Persists `report` for `host`, stamped with `ingested_at`
    pub async fn store_at(
        &self,
        report: ScanReport,
        host: &str,
        ingested_at: DateTime<Utc>,
    ) -> Result<StoredDocument, StoreError> {
        let doc = StoredDocument::new(host, report, ingested_at);
        self.reports.insert(&doc).await?;

        info!("Stored report for {}", host);
        Ok(doc)
    }
}

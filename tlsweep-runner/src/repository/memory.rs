//! In-memory repositories used by service and scheduler tests

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tlsweep_client::ClientError;
use tlsweep_core::domain::document::StoredDocument;
use tlsweep_core::domain::scan::ScanReport;
use tlsweep_core::dto::analyze::ScanRequest;

use super::{ReportRepository, ScanRepository};
use crate::error::StoreError;

/// Report with only a status field
pub fn report(status: &str) -> ScanReport {
    ScanReport::new(json!({ "status": status }))
}

/// Scan API replaying a fixed sequence of responses per host
#[derive(Default)]
pub struct ScriptedScans {
    scripts: Mutex<HashMap<String, VecDeque<Result<ScanReport, ClientError>>>>,
    requests: Mutex<Vec<ScanRequest>>,
}

impl ScriptedScans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, host: &str, response: Result<ScanReport, ClientError>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(host.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<ScanRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, host: &str) -> Vec<ScanRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.host == host)
            .collect()
    }
}

#[async_trait]
impl ScanRepository for ScriptedScans {
    async fn analyze(&self, request: &ScanRequest) -> Result<ScanReport, ClientError> {
        self.requests.lock().unwrap().push(request.clone());

        self.scripts
            .lock()
            .unwrap()
            .get_mut(&request.host)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ClientError::api_error(500, "no scripted response")))
    }
}

/// Report collection held in a vector, rejecting duplicate ids
#[derive(Default)]
pub struct InMemoryReports {
    docs: Mutex<Vec<StoredDocument>>,
    unreachable: bool,
}

impl InMemoryReports {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection whose every insert fails as if the database were down
    pub fn unreachable() -> Self {
        Self {
            docs: Mutex::new(Vec::new()),
            unreachable: true,
        }
    }

    pub fn docs(&self) -> Vec<StoredDocument> {
        self.docs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReports {
    async fn insert(&self, doc: &StoredDocument) -> Result<(), StoreError> {
        if self.unreachable {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut docs = self.docs.lock().unwrap();
        if docs.iter().any(|d| d.id == doc.id) {
            return Err(StoreError::DuplicateId(doc.id.clone()));
        }
        docs.push(doc.clone());
        Ok(())
    }
}

//! Scan orchestrator
//!
//! Runs poller then store for each host, strictly one host at a time. A
//! failing host is logged and recorded, and the next host is attempted.

use tracing::{error, info};

use crate::error::HostError;
use crate::service::{ReportStore, ScanPoller};

/// What happened to one host during a run
#[derive(Debug)]
pub struct HostOutcome {
    pub host: String,
    /// Id of the stored document on success
    pub result: Result<String, HostError>,
}

impl HostOutcome {
    pub fn is_stored(&self) -> bool {
        self.result.is_ok()
    }
}

/// Sequential scan-and-store over a fixed host list
pub struct ScanOrchestrator {
    poller: ScanPoller,
    store: ReportStore,
    hosts: Vec<String>,
}

impl ScanOrchestrator {
    pub fn new(poller: ScanPoller, store: ReportStore, hosts: Vec<String>) -> Self {
        Self {
            poller,
            store,
            hosts,
        }
    }

    /// Attempts every host in order and returns one outcome per host
    pub async fn run(&self) -> Vec<HostOutcome> {
        info!("Processing {} host(s)", self.hosts.len());

        let mut outcomes = Vec::with_capacity(self.hosts.len());

        for host in &self.hosts {
            let result = self.process_host(host).await;

            if let Err(e) = &result {
                error!("Failed to process {}: {}", host, e);
            }

            outcomes.push(HostOutcome {
                host: host.clone(),
                result,
            });
        }

        outcomes
    }

    async fn process_host(&self, host: &str) -> Result<String, HostError> {
        info!("Starting scan of {}", host);

        let report = self.poller.poll(host).await?;

        let doc = self
            .store
            .store(report, host)
            .await
            .map_err(|source| HostError::Persistence {
                host: host.to_string(),
                source,
            })?;

        Ok(doc.id)
    }
}

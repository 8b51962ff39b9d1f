//! Scan poller
//!
//! Drives one remote assessment to a terminal status:
//! - Sends the initial analyze request
//! - Returns on READY, fails on ERROR
//! - Otherwise sleeps a fixed interval and re-requests with `all=done`
//!
//! Without `max_attempts` the loop only ends on a terminal status.

use std::sync::Arc;
use std::time::Duration;
use tlsweep_core::domain::scan::{ScanReport, ScanStatus};
use tlsweep_core::dto::analyze::ScanRequest;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::HostError;
use crate::repository::ScanRepository;

/// Polling behaviour for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay before each poll request
    pub interval: Duration,
    /// Maximum number of poll requests after the initial one
    pub max_attempts: Option<u32>,
}

impl From<&Config> for PollSettings {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.poll_interval,
            max_attempts: config.max_poll_attempts,
        }
    }
}

/// Polls the analyze API until a scan reaches READY or ERROR
pub struct ScanPoller {
    scans: Arc<dyn ScanRepository>,
    settings: PollSettings,
}

impl ScanPoller {
    pub fn new(scans: Arc<dyn ScanRepository>, settings: PollSettings) -> Self {
        Self { scans, settings }
    }

    /// Returns the READY report for `host`
    pub async fn poll(&self, host: &str) -> Result<ScanReport, HostError> {
        if host.trim().is_empty() {
            return Err(HostError::InvalidHost(host.to_string()));
        }

        let mut report = self.request(ScanRequest::initial(host)).await?;
        let mut polls: u32 = 0;

        loop {
            match report.status() {
                Some(ScanStatus::Ready) => {
                    debug!("Scan of {} ready after {} poll(s)", host, polls);
                    return Ok(report);
                }
                Some(ScanStatus::Error) => {
                    return Err(HostError::Analysis {
                        host: host.to_string(),
                        message: report
                            .status_message()
                            .unwrap_or("unknown error")
                            .to_string(),
                    });
                }
                status => {
                    if self.settings.max_attempts.is_some_and(|max| polls >= max) {
                        return Err(HostError::poll_limit(host, polls, status.as_ref()));
                    }

                    match &status {
                        Some(status) => info!("Scanning {}: status={}", host, status),
                        None => info!("Scanning {}: no status yet", host),
                    }

                    tokio::time::sleep(self.settings.interval).await;
                    polls += 1;
                    report = self.request(ScanRequest::poll(host)).await?;
                }
            }
        }
    }

    async fn request(&self, request: ScanRequest) -> Result<ScanReport, HostError> {
        self.scans
            .analyze(&request)
            .await
            .map_err(|source| HostError::Transport {
                host: request.host.clone(),
                source,
            })
    }
}

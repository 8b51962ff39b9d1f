//! Scans repository
//!
//! Single calls to the remote analyze endpoint. Status interpretation and
//! polling live in the poller service.

use async_trait::async_trait;
use tlsweep_client::{ClientError, SslLabsClient};
use tlsweep_core::domain::scan::ScanReport;
use tlsweep_core::dto::analyze::ScanRequest;

/// Repository trait for the remote analyze API
#[async_trait]
pub trait ScanRepository: Send + Sync {
    /// Sends one analyze request and returns the decoded report
    ///
    /// Any non-success response is an error; a report with status ERROR is not.
    async fn analyze(&self, request: &ScanRequest) -> Result<ScanReport, ClientError>;
}

#[async_trait]
impl ScanRepository for SslLabsClient {
    async fn analyze(&self, request: &ScanRequest) -> Result<ScanReport, ClientError> {
        SslLabsClient::analyze(self, request).await
    }
}

//! Tlsweep HTTP Client
//!
//! A small, type-safe client for the SSL Labs analyze endpoint.
//!
//! Every call is a `GET` against a single endpoint, carrying the host (and
//! optionally `all=done`) as query parameters and the registered email as a
//! header. Responses are returned as opaque [`ScanReport`]s.
//!
//! # Example
//!
//! ```no_run
//! use tlsweep_client::SslLabsClient;
//! use tlsweep_core::dto::analyze::ScanRequest;
//!
//! #[tokio::main]
//! async fn main() -> tlsweep_client::Result<()> {
//!     let client = SslLabsClient::new(
//!         "https://api.ssllabs.com/api/v4/analyze",
//!         "ops@example.com",
//!     );
//!
//!     let report = client.analyze(&ScanRequest::initial("example.com")).await?;
//!     println!("status: {:?}", report.status());
//!     Ok(())
//! }
//! ```

pub mod error;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use tlsweep_core::domain::scan::ScanReport;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tlsweep_core::dto::analyze::ScanRequest;
use tracing::debug;

/// Default analyze endpoint (API v4)
pub const DEFAULT_API_URL: &str = "https://api.ssllabs.com/api/v4/analyze";

/// Header carrying the registered account email
const EMAIL_HEADER: &str = "email";

/// HTTP client for the analyze endpoint
#[derive(Debug, Clone)]
pub struct SslLabsClient {
    /// Full URL of the analyze endpoint
    base_url: String,
    /// Registered email sent with every request
    email: String,
    /// HTTP client instance
    client: Client,
}

impl SslLabsClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The analyze endpoint (e.g., "https://api.ssllabs.com/api/v4/analyze")
    /// * `email` - The email registered with the API
    pub fn new(base_url: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_client(base_url, email, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        email: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            email: email.into(),
            client,
        }
    }

    /// Get the analyze endpoint URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call the analyze endpoint once
    ///
    /// Non-success HTTP statuses are returned as [`ClientError::ApiError`];
    /// the scan status inside the body is not interpreted here.
    pub async fn analyze(&self, req: &ScanRequest) -> Result<ScanReport> {
        if req.host.trim().is_empty() {
            return Err(ClientError::InvalidRequest("host cannot be empty".to_string()));
        }

        debug!(host = %req.host, poll = req.is_poll(), "Requesting analyze");

        let response = self
            .client
            .get(&self.base_url)
            .header(CONTENT_TYPE, "application/json")
            .header(EMAIL_HEADER, &self.email)
            .query(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

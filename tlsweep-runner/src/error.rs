//! Error types for a single host's scan-and-store run

use thiserror::Error;
use tlsweep_client::ClientError;
use tlsweep_core::domain::scan::ScanStatus;

/// Errors raised while writing to the report collection
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with the same id already exists
    #[error("document '{0}' already exists")]
    DuplicateId(String),

    /// The database was unreachable or rejected the write
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Reasons processing of one host stopped without a stored report
#[derive(Debug, Error)]
pub enum HostError {
    #[error("invalid host '{0}'")]
    InvalidHost(String),

    /// Request did not produce a usable response (network, non-2xx, bad body)
    #[error("{host}: scan request failed: {source}")]
    Transport {
        host: String,
        #[source]
        source: ClientError,
    },

    /// The API finished the assessment with status ERROR
    #[error("{host} - API Error: {message}")]
    Analysis { host: String, message: String },

    #[error("{host}: scan still {last_status} after {attempts} poll(s)")]
    PollLimitExceeded {
        host: String,
        attempts: u32,
        last_status: String,
    },

    #[error("{host}: failed to store report: {source}")]
    Persistence {
        host: String,
        #[source]
        source: StoreError,
    },
}

impl HostError {
    pub(crate) fn poll_limit(host: &str, attempts: u32, last_status: Option<&ScanStatus>) -> Self {
        HostError::PollLimitExceeded {
            host: host.to_string(),
            attempts,
            last_status: last_status
                .map(ScanStatus::to_string)
                .unwrap_or_else(|| "without status".to_string()),
        }
    }
}

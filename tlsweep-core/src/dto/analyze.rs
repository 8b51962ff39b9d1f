//! Analyze endpoint request parameters

use serde::{Deserialize, Serialize};

/// Value of the `all` parameter sent on poll requests
pub const ALL_DONE: &str = "done";

/// Query parameters for a single call to the analyze endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<String>,
}

impl ScanRequest {
    /// Request that starts (or joins) an assessment
    pub fn initial(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            all: None,
        }
    }

    /// Follow-up request asking for full detail once the assessment is done
    pub fn poll(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            all: Some(ALL_DONE.to_string()),
        }
    }

    pub fn is_poll(&self) -> bool {
        self.all.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_request_omits_all() {
        let req = ScanRequest::initial("example.com");
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(value, serde_json::json!({ "host": "example.com" }));
        assert!(!req.is_poll());
    }

    #[test]
    fn test_poll_request_sets_all_done() {
        let req = ScanRequest::poll("example.com");
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "host": "example.com", "all": "done" })
        );
        assert!(req.is_poll());
    }
}

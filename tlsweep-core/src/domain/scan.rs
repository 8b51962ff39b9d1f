//! Scan domain types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Status of a remote assessment as reported by the analyze endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScanStatus {
    Dns,
    InProgress,
    Ready,
    Error,
    /// Any status string the API returns that is not known here
    Other(String),
}

impl ScanStatus {
    /// READY and ERROR end polling; everything else is intermediate
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanStatus::Ready | ScanStatus::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ScanStatus::Dns => "DNS",
            ScanStatus::InProgress => "IN_PROGRESS",
            ScanStatus::Ready => "READY",
            ScanStatus::Error => "ERROR",
            ScanStatus::Other(s) => s,
        }
    }
}

impl From<&str> for ScanStatus {
    fn from(s: &str) -> Self {
        match s {
            "DNS" => ScanStatus::Dns,
            "IN_PROGRESS" => ScanStatus::InProgress,
            "READY" => ScanStatus::Ready,
            "ERROR" => ScanStatus::Error,
            other => ScanStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ScanStatus {
    fn from(s: String) -> Self {
        ScanStatus::from(s.as_str())
    }
}

impl From<ScanStatus> for String {
    fn from(status: ScanStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report returned by the analyze endpoint
///
/// The body is kept as an opaque JSON document. Only the status fields are
/// interpreted; everything else is passed through to storage untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanReport(JsonValue);

impl ScanReport {
    pub fn new(body: JsonValue) -> Self {
        Self(body)
    }

    /// The `status` field, or `None` when the body carries no status string
    pub fn status(&self) -> Option<ScanStatus> {
        self.0
            .get("status")
            .and_then(JsonValue::as_str)
            .map(ScanStatus::from)
    }

    /// The `statusMessage` field, present on ERROR reports
    pub fn status_message(&self) -> Option<&str> {
        self.0.get("statusMessage").and_then(JsonValue::as_str)
    }

    pub fn body(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_body(self) -> JsonValue {
        self.0
    }
}

impl From<JsonValue> for ScanReport {
    fn from(body: JsonValue) -> Self {
        Self(body)
    }
}

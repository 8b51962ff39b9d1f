//! Core domain types
//!
//! The scan report is produced by the remote API and owned by the runner until
//! it is persisted as a stored document.

pub mod document;
pub mod scan;

//! Repository layer
//!
//! Repositories abstract the two external systems a run talks to: the remote
//! analyze API and the report collection. They carry no business logic.
//!
//! All repositories are trait-based so the services can be tested with
//! in-memory implementations.

#[cfg(test)]
pub mod memory;
mod reports;
mod scans;

// Re-export traits
pub use reports::ReportRepository;
pub use scans::ScanRepository;

// Re-export implementations
pub use reports::PgReportRepository;

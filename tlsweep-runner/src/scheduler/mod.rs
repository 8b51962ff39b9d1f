//! Scheduler layer for the runner
//!
//! Walks the host list and runs the poller and store for each host in turn,
//! containing failures to the host that raised them.

pub mod orchestrator;

pub use orchestrator::{HostOutcome, ScanOrchestrator};

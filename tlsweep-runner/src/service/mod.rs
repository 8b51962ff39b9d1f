//! Service layer
//!
//! Services hold the run's logic on top of the repositories: driving a scan
//! to completion and writing the finished report.

mod poller;
mod store;

pub use poller::{PollSettings, ScanPoller};
pub use store::ReportStore;

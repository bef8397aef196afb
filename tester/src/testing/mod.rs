//! Run reporting
//!
//! Per-run reports and the summary printed at the end of a scenario.

pub mod report;

pub use report::{RunOutcome, RunReport, RunSummary};

//! Plot construction and HTML report assembly.
pub mod plots;
pub mod report;

pub use report::{Report, ReportSection};

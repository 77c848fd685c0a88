//! Core domain types for recoil-probe.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod record;
mod thresholds;

pub use record::{OperationRecord, Outcome, Status, Verdict};
pub use thresholds::{ThresholdError, Thresholds};

/// Serialization format of a remote dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadFormat {
    /// Delimited text with a header row.
    Csv,
    /// Python pickle stream.
    Pickle,
}

impl PayloadFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pickle => "pickle",
        }
    }
}

//! Operation records produced by the bounded runner.

use std::fmt;
use std::time::Duration;

use crate::Thresholds;

/// Terminal state of one measured operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Timeout,
    Error,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Timeout => "timeout",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an operation ended, carrying the value or failure message.
///
/// Only `Success` carries a value, so a timed-out or failed record can never
/// be mistaken for one that produced a result.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// The deadline elapsed and the operation was cancelled.
    Timeout,
    /// The operation failed; the message is kept for display.
    Error(String),
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Success(_) => Status::Success,
            Self::Timeout => Status::Timeout,
            Self::Error(_) => Status::Error,
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Timeout | Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Success(_) | Self::Timeout => None,
        }
    }
}

/// Summary classification shown in the report table.
///
/// Timeout and error take precedence over slowness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Ok,
    Slow,
    Timeout,
    Error,
}

/// Result of one timed measurement. Immutable once built.
#[derive(Debug, Clone)]
pub struct OperationRecord<T> {
    name: String,
    elapsed: Duration,
    outcome: Outcome<T>,
    slow: bool,
}

impl<T> OperationRecord<T> {
    /// Build a record, deriving the slow flag from `thresholds`.
    ///
    /// Only successes can be slow; a timeout is already past the soft limit
    /// and an error is reported as an error regardless of duration.
    pub fn new(
        name: impl Into<String>,
        elapsed: Duration,
        outcome: Outcome<T>,
        thresholds: &Thresholds,
    ) -> Self {
        let slow = matches!(outcome, Outcome::Success(_)) && thresholds.is_slow(elapsed);
        Self {
            name: name.into(),
            elapsed,
            outcome,
            slow,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub const fn outcome(&self) -> &Outcome<T> {
        &self.outcome
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.outcome.status()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&T> {
        self.outcome.value()
    }

    #[must_use]
    pub const fn is_slow(&self) -> bool {
        self.slow
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        match self.outcome {
            Outcome::Timeout => Verdict::Timeout,
            Outcome::Error(_) => Verdict::Error,
            Outcome::Success(_) if self.slow => Verdict::Slow,
            Outcome::Success(_) => Verdict::Ok,
        }
    }
}

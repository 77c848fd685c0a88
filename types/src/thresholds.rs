//! Timing threshold invariant types.
//!
//! A [`Thresholds`] value guarantees a non-zero deadline and
//! `soft <= deadline` by construction. A soft warning past the deadline
//! could never be reached, since the operation is cancelled first.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("deadline must be greater than zero")]
    ZeroDeadline,
    #[error("slow threshold ({soft:?}) must not exceed the deadline ({deadline:?})")]
    SoftExceedsDeadline { soft: Duration, deadline: Duration },
}

/// Soft and hard time limits for one measured operation.
///
/// - `deadline`: the operation is cancelled once this much wall-clock time
///   has passed.
/// - `soft`: a completed operation that took longer than this is flagged
///   slow but still counts as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    soft: Duration,
    deadline: Duration,
}

impl Thresholds {
    pub const DEFAULT_SOFT: Duration = Duration::from_secs(10);
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(15);

    pub fn new(soft: Duration, deadline: Duration) -> Result<Self, ThresholdError> {
        if deadline.is_zero() {
            return Err(ThresholdError::ZeroDeadline);
        }
        if soft > deadline {
            return Err(ThresholdError::SoftExceedsDeadline { soft, deadline });
        }
        Ok(Self { soft, deadline })
    }

    /// Thresholds with the given deadline and the soft threshold clamped to it.
    pub fn with_deadline(deadline: Duration) -> Result<Self, ThresholdError> {
        Self::new(Self::DEFAULT_SOFT.min(deadline), deadline)
    }

    #[must_use]
    pub const fn soft(&self) -> Duration {
        self.soft
    }

    #[must_use]
    pub const fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Whether a completed operation that took `elapsed` counts as slow.
    #[must_use]
    pub fn is_slow(&self, elapsed: Duration) -> bool {
        elapsed > self.soft
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            soft: Self::DEFAULT_SOFT,
            deadline: Self::DEFAULT_DEADLINE,
        }
    }
}

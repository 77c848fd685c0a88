//! The bounded operation runner.
use std::any::Any;
use std::fmt::Display;
use std::panic::AssertUnwindSafe;

use futures_util::future::{AbortHandle, Abortable, FutureExt};
use probe_types::{OperationRecord, Outcome, Thresholds, Verdict};
use tokio::time::Instant;

use crate::deadline::Deadline;

/// Run `op` under `thresholds.deadline()` and record what happened.
///
/// - returns `Ok(v)` in time: [`Outcome::Success`], flagged slow past the
///   soft threshold
/// - still running at the deadline: the future is dropped at its next
///   suspension point and the outcome is [`Outcome::Timeout`]
/// - returns `Err(e)` or panics: [`Outcome::Error`] with the message
///
/// Elapsed time is measured from just before `op` is invoked until the
/// outcome is known. Never panics and never retries.
pub async fn run_bounded<T, E, F, Fut>(
    name: &str,
    thresholds: &Thresholds,
    op: F,
) -> OperationRecord<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    tracing::info!(
        operation = name,
        deadline_ms = thresholds.deadline().as_millis() as u64,
        "Starting operation"
    );

    let (abort_handle, abort_registration) = AbortHandle::new_pair();
    let started = Instant::now();
    let deadline = Deadline::arm(thresholds.deadline(), abort_handle);

    // Invoke inside the future so a panic while building it is caught too.
    let guarded = AssertUnwindSafe(async move { op().await }).catch_unwind();
    let result = Abortable::new(guarded, abort_registration).await;

    let elapsed = started.elapsed();
    drop(deadline);

    let outcome = match result {
        Err(_aborted) => Outcome::Timeout,
        Ok(Err(panic_payload)) => Outcome::Error(format!(
            "panicked: {}",
            panic_payload_to_string(&*panic_payload)
        )),
        Ok(Ok(Err(err))) => Outcome::Error(err.to_string()),
        Ok(Ok(Ok(value))) => Outcome::Success(value),
    };

    let record = OperationRecord::new(name, elapsed, outcome, thresholds);
    log_record(&record);
    record
}

fn log_record<T>(record: &OperationRecord<T>) {
    let elapsed_ms = record.elapsed().as_millis() as u64;
    match record.verdict() {
        Verdict::Ok => {
            tracing::info!(operation = record.name(), elapsed_ms, "Operation succeeded");
        }
        Verdict::Slow => {
            tracing::warn!(
                operation = record.name(),
                elapsed_ms,
                "Operation succeeded past the slow threshold"
            );
        }
        Verdict::Timeout => {
            tracing::warn!(operation = record.name(), elapsed_ms, "Operation timed out");
        }
        Verdict::Error => {
            tracing::warn!(
                operation = record.name(),
                elapsed_ms,
                error = record.outcome().error_message().unwrap_or_default(),
                "Operation failed"
            );
        }
    }
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

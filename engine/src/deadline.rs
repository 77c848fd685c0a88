//! Scoped deadline guard.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures_util::future::AbortHandle;
use tokio::task::JoinHandle;

/// Aborts an in-flight future once `after` has elapsed, unless dropped first.
///
/// The timer is a task of its own. Dropping the guard aborts that task, so a
/// deadline armed for one operation can never fire into the next one.
#[derive(Debug)]
#[must_use = "dropping the guard disarms the deadline"]
pub struct Deadline {
    timer: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

impl Deadline {
    /// Arm a deadline that calls `target.abort()` after `after`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(after: Duration, target: AbortHandle) -> Self {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            flag.store(true, Ordering::SeqCst);
            target.abort();
        });
        Self { timer, fired }
    }

    /// Whether the deadline has already fired.
    #[must_use]
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

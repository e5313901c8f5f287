//! Single-shot deadline running its callback on a worker task
//!
//! The menu arms one deadline when the conversation reaches the
//! `start_timer` checkpoint and cancels it on `stop_timer` or focus loss.
//! At most one deadline is meant to be pending at a time; the session
//! controller guards arming with its own latch.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Cancellable, restartable single-shot deadline
pub struct IdleTimer {
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl IdleTimer {
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Arm the deadline
    ///
    /// `on_fire` runs exactly once after `after`, on the timer's own task.
    /// The pending handle is cleared before the callback runs, so the
    /// callback may cancel or re-arm freely. Arming while a deadline is
    /// pending is a caller error; the previous deadline is not cancelled.
    pub fn arm<F>(&self, after: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let slot = Arc::clone(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if let Ok(mut pending) = slot.lock() {
                pending.take();
            }
            on_fire();
        });

        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(handle);
        }
        debug!(after_ms = after.as_millis() as u64, "idle deadline armed");
    }

    /// Cancel the pending deadline, if any
    ///
    /// Safe to call at any point: with nothing armed, after the deadline
    /// fired, or repeatedly.
    pub fn cancel(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
                debug!("idle deadline cancelled");
            }
        }
    }

    /// Whether a deadline is currently pending
    pub fn is_armed(&self) -> bool {
        self.pending
            .lock()
            .map(|pending| pending.is_some())
            .unwrap_or(false)
    }
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IdleTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

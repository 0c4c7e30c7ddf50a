//! # Cancellation primitives.
//!
//! [`Cancel`] is an explicit cancellation signal: a thin wrapper over
//! [`tokio_util::sync::CancellationToken`] exposing "already triggered",
//! "trigger now" and "wait for trigger". Subscriptions created with
//! `on_until`/`once_until` are removed automatically when their token fires;
//! [`Cancel::after`] derives a token that triggers itself once a duration
//! elapses.
//!
//! [`Limit`] is the "timeout or token" input accepted by the wait/race
//! helpers. Keeping the two forms distinct lets an abort report *why* it
//! happened ([`AbortReason::Timeout`] vs [`AbortReason::Triggered`]), and
//! lets a plain timeout live as a sleep inside the waiting future itself, so
//! it is dropped the moment the wait resolves.
//!
//! ## Example
//! ```rust
//! use eventry::Cancel;
//!
//! let cancel = Cancel::new();
//! assert!(!cancel.is_triggered());
//! cancel.trigger();
//! assert!(cancel.is_triggered());
//! ```

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Explicit cancellation signal.
///
/// Clones share the same underlying token: triggering any clone triggers all
/// of them.
#[derive(Clone, Debug, Default)]
pub struct Cancel {
    token: CancellationToken,
}

impl Cancel {
    /// Creates an untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signal that triggers itself after `delay`.
    ///
    /// The timer task exits early if the signal is triggered by other means.
    /// Requires a running tokio runtime.
    pub fn after(delay: Duration) -> Self {
        let cancel = Self::new();
        let token = cancel.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => token.cancel(),
            }
        });
        cancel
    }

    /// Triggers the signal. Idempotent.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// True once the signal has been triggered.
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes when the signal is triggered.
    ///
    /// Completes immediately if it already was.
    pub async fn triggered(&self) {
        self.token.cancelled().await;
    }

    /// Derives a child signal: triggering `self` triggers the child, but
    /// triggering the child leaves `self` untouched.
    pub fn child(&self) -> Cancel {
        Cancel { token: self.token.child_token() }
    }
}

impl From<Duration> for Cancel {
    /// Equivalent to [`Cancel::after`].
    fn from(delay: Duration) -> Self {
        Cancel::after(delay)
    }
}

impl From<&Cancel> for Cancel {
    fn from(cancel: &Cancel) -> Self {
        cancel.clone()
    }
}

/// Bound on how long a wait/race may stay pending.
#[derive(Clone, Debug)]
pub enum Limit {
    /// Abort after a fixed duration.
    Timeout(Duration),
    /// Abort when an external signal triggers.
    Abort(Cancel),
}

impl From<Duration> for Limit {
    fn from(d: Duration) -> Self {
        Limit::Timeout(d)
    }
}

impl From<Cancel> for Limit {
    fn from(cancel: Cancel) -> Self {
        Limit::Abort(cancel)
    }
}

impl From<&Cancel> for Limit {
    fn from(cancel: &Cancel) -> Self {
        Limit::Abort(cancel.clone())
    }
}

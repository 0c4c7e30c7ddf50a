//! Error types used by the emitter.
//!
//! This module defines:
//!
//! - [`EmitError`] — every failure the emitter surfaces to callers.
//! - [`AbortReason`] — why a wait/race stopped before its event arrived.
//!
//! [`EmitError`] provides helper methods (`as_label`, `as_message`) for
//! logging/metrics and [`EmitError::fault`] for reaching the raised value.
//!
//! The propagation policy: failures are never swallowed silently. Every
//! listener failure either reaches a caller-visible `Err` or an explicitly
//! registered `"error"`/error-monitor listener.

use std::fmt;

use thiserror::Error;

use crate::events::Fault;

/// Why a wait/race aborted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortReason {
    /// The supplied timeout elapsed first.
    Timeout,
    /// The supplied cancellation signal triggered first.
    Triggered,
    /// Every armed subscription was removed while the wait was pending
    /// (e.g. by `off_all`), so the event can no longer arrive.
    Detached,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbortReason::Timeout => "timeout",
            AbortReason::Triggered => "cancelled",
            AbortReason::Detached => "subscriptions removed",
        };
        write!(f, "{s}")
    }
}

/// # Errors surfaced by the emitter.
///
/// Subscription calls fail synchronously only for caller bugs
/// ([`EmitError::InvalidArgument`]); listener failures surface through the
/// *emitting* caller, never the subscribing one.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum EmitError {
    /// Malformed subscription input; always a caller bug, never retried.
    ///
    /// With typed identifiers and listeners the reachable case is passing an
    /// already-triggered cancellation to `on_until`/`once_until`.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the call.
        reason: &'static str,
    },

    /// A wait/race stopped before the awaited event arrived.
    #[error("wait for [{events}] aborted: {reason}")]
    Aborted {
        /// The awaited identifier(s), comma-joined.
        events: String,
        /// What cut the wait short.
        reason: AbortReason,
    },

    /// A listener raised during dispatch and no `"error"` listener was
    /// registered to handle it.
    #[error("listener failed: {fault}")]
    ListenerFailed {
        /// The raised value, unmodified.
        fault: Fault,
    },

    /// `emit` on the `"error"` channel found zero listeners; the emitted
    /// payload itself is the failure cause.
    #[error("unhandled 'error' event: {fault}")]
    Unobserved {
        /// The emitted payload.
        fault: Fault,
    },
}

impl EmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventry::{AbortReason, EmitError};
    ///
    /// let err = EmitError::Aborted {
    ///     events: "ready".into(),
    ///     reason: AbortReason::Timeout,
    /// };
    /// assert_eq!(err.as_label(), "wait_aborted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::InvalidArgument { .. } => "invalid_argument",
            EmitError::Aborted { .. } => "wait_aborted",
            EmitError::ListenerFailed { .. } => "listener_failed",
            EmitError::Unobserved { .. } => "error_unobserved",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitError::InvalidArgument { reason } => format!("invalid argument: {reason}"),
            EmitError::Aborted { events, reason } => {
                format!("aborted ({reason}) while waiting for [{events}]")
            }
            EmitError::ListenerFailed { fault } => format!("listener failure: {fault}"),
            EmitError::Unobserved { fault } => format!("unobserved error: {fault}"),
        }
    }

    /// The raised/emitted value, when this error carries one.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            EmitError::ListenerFailed { fault } | EmitError::Unobserved { fault } => Some(fault),
            _ => None,
        }
    }

    /// True when a wait/race was cut short (by timeout, trigger or
    /// detachment) rather than failing outright.
    pub fn is_abort(&self) -> bool {
        matches!(self, EmitError::Aborted { .. })
    }
}

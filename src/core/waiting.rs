//! # Wait / race helpers.
//!
//! One-shot awaits built entirely on the subscription API: each helper arms
//! `once` subscriptions, resolves with the first matching payload, and
//! releases everything it registered on every exit path.
//!
//! ## Architecture
//! ```text
//! wait / race
//!   ├─► arm: once-subscription per identifier, all feeding one oneshot slot
//!   ├─► select (biased):
//!   │     1. payload arrived            ─► Ok(payload)
//!   │     2. timeout elapsed            ─► Err(Aborted, Timeout)
//!   │        or cancel triggered        ─► Err(Aborted, Triggered)
//!   │     (slot dropped with no winner  ─► Err(Aborted, Detached))
//!   └─► guard.off() — removes losers, drops the timeout sleep
//! ```
//!
//! ## Tie-break
//! The arrival branch is polled first (`biased`): when the event and its
//! cancellation are both ready in the same tick, the event wins.
//!
//! ## Example
//! ```no_run
//! use std::time::Duration;
//! use eventry::{payload, EventEmitter};
//!
//! # async fn demo() -> Result<(), eventry::EmitError> {
//! let emitter = EventEmitter::new();
//! let waiter = emitter.clone();
//!
//! let (got, sent) = tokio::join!(
//!     waiter.wait_for("ready", Duration::from_millis(100)),
//!     emitter.emit("ready", payload(42u32)),
//! );
//! sent?;
//! assert_eq!(got?.downcast_ref::<u32>(), Some(&42));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};

use crate::cancel::Limit;
use crate::core::emitter::EventEmitter;
use crate::core::guard::OffGuard;
use crate::error::{AbortReason, EmitError};
use crate::events::{Fault, Ident, Payload};
use crate::listeners::ListenFn;

impl EventEmitter {
    /// Resolves with the payload of the next `ident` event.
    ///
    /// No bound: pends until the event fires (or until every armed
    /// subscription is removed out from under it, which aborts with
    /// [`AbortReason::Detached`]).
    pub async fn wait(&self, ident: impl Into<Ident>) -> Result<Payload, EmitError> {
        self.await_any(vec![ident.into()], None).await
    }

    /// [`wait`](Self::wait) bounded by a timeout or cancellation signal.
    ///
    /// `limit` accepts a [`Duration`](std::time::Duration), a
    /// [`Cancel`](crate::Cancel) or `&Cancel`. If the bound fires first the
    /// wait fails with [`EmitError::Aborted`] naming the identifier; an
    /// already-triggered signal fails before any subscription is made.
    pub async fn wait_for(
        &self,
        ident: impl Into<Ident>,
        limit: impl Into<Limit>,
    ) -> Result<Payload, EmitError> {
        self.await_any(vec![ident.into()], Some(limit.into())).await
    }

    /// Resolves with the payload of whichever listed identifier fires first;
    /// the remaining subscriptions are removed.
    ///
    /// Degenerates to [`wait`](Self::wait) for a single identifier. An empty
    /// list can never fire and aborts with [`AbortReason::Detached`].
    pub async fn race<I>(
        &self,
        idents: impl IntoIterator<Item = I>,
    ) -> Result<Payload, EmitError>
    where
        I: Into<Ident>,
    {
        let idents = idents.into_iter().map(Into::into).collect();
        self.await_any(idents, None).await
    }

    /// [`race`](Self::race) bounded by a timeout or cancellation signal.
    ///
    /// An abort names all awaited identifiers, comma-joined.
    pub async fn race_for<I>(
        &self,
        idents: impl IntoIterator<Item = I>,
        limit: impl Into<Limit>,
    ) -> Result<Payload, EmitError>
    where
        I: Into<Ident>,
    {
        let idents = idents.into_iter().map(Into::into).collect();
        self.await_any(idents, Some(limit.into())).await
    }

    /// Pends until something is emitted on `"error"`, then fails with it.
    ///
    /// The pending subscription counts as an `"error"` listener, so listener
    /// failures elsewhere are routed here (and their originating `emit`
    /// resolves as handled) while this call is in flight.
    pub async fn throw_on_error(&self) -> Result<(), EmitError> {
        let outcome = self.wait(Ident::ERROR).await;
        Self::rethrow(outcome)
    }

    /// [`throw_on_error`](Self::throw_on_error) bounded by a timeout or
    /// cancellation signal.
    ///
    /// An abort means "no error arrived" and resolves with `Ok(())` instead
    /// of failing.
    pub async fn throw_on_error_for(&self, limit: impl Into<Limit>) -> Result<(), EmitError> {
        let outcome = self.wait_for(Ident::ERROR, limit).await;
        Self::rethrow(outcome)
    }

    fn rethrow(outcome: Result<Payload, EmitError>) -> Result<(), EmitError> {
        match outcome {
            Ok(data) => Err(EmitError::ListenerFailed { fault: Fault::from_payload(data) }),
            Err(err) if err.is_abort() => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn await_any(
        &self,
        idents: Vec<Ident>,
        limit: Option<Limit>,
    ) -> Result<Payload, EmitError> {
        let events = join_labels(&idents);
        if let Some(Limit::Abort(cancel)) = &limit {
            if cancel.is_triggered() {
                return Err(aborted(&events, AbortReason::Triggered));
            }
        }

        let (mut rx, guard) = self.arm(idents);
        let outcome = match limit {
            None => rx.await.map_err(|_| aborted(&events, AbortReason::Detached)),
            Some(Limit::Timeout(delay)) => {
                tokio::select! {
                    biased;
                    res = &mut rx => res.map_err(|_| aborted(&events, AbortReason::Detached)),
                    _ = tokio::time::sleep(delay) => Err(aborted(&events, AbortReason::Timeout)),
                }
            }
            Some(Limit::Abort(cancel)) => {
                tokio::select! {
                    biased;
                    res = &mut rx => res.map_err(|_| aborted(&events, AbortReason::Detached)),
                    _ = cancel.triggered() => Err(aborted(&events, AbortReason::Triggered)),
                }
            }
        };

        // Removes the losing subscriptions; the winning once-entry already
        // claimed itself. Dropping the select also drops any timeout sleep.
        guard.off();
        outcome
    }

    /// Arms one `once` subscription per identifier, all feeding a shared
    /// oneshot slot; the first to fire wins.
    fn arm(&self, idents: Vec<Ident>) -> (oneshot::Receiver<Payload>, OffGuard) {
        let (tx, rx) = oneshot::channel::<Payload>();
        let slot = Arc::new(Mutex::new(Some(tx)));

        let items = idents
            .into_iter()
            .map(|ident| {
                let slot = Arc::clone(&slot);
                let listener = ListenFn::arc(move |data: Payload| {
                    let slot = Arc::clone(&slot);
                    async move {
                        if let Some(tx) = slot.lock().await.take() {
                            let _ = tx.send(data);
                        }
                        Ok(())
                    }
                });
                (ident, listener)
            })
            .collect();

        (rx, self.subscribe_many(items, true))
    }
}

fn join_labels(idents: &[Ident]) -> String {
    idents
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn aborted(events: &str, reason: AbortReason) -> EmitError {
    EmitError::Aborted { events: events.to_string(), reason }
}

//! # Event emitter: subscription API and dispatch engine.
//!
//! [`EventEmitter`] owns the [`Registry`] and exposes the full programmatic
//! contract: `on`/`once`/`off` bookkeeping, bulk registration, fan-out and
//! serial dispatch, and the error-propagation protocol. The wait/race
//! helpers live in [`crate::core::waiting`] and are built entirely on the
//! subscription API defined here.
//!
//! ## Dispatch
//! `emit` captures a snapshot of the listener list, then starts every
//! listener concurrently in registration order and settles only after the
//! slowest one. `emit_serial` awaits listeners one at a time and aborts on
//! the first failure.
//!
//! ## Error propagation
//! ```text
//! listener raises Fault
//!        │
//!        ├──► error-monitor listeners (passive tap, failures logged)
//!        │
//!        ├──► "error" has listeners? ──yes──► redeliver Fault there,
//!        │                                    invocation counts as handled
//!        └──────────────────────────no──► emit fails with ListenerFailed
//! ```
//! Listeners on `"error"` or the monitor channel run unwrapped, so a failure
//! about a failure never loops.

use std::sync::Arc;

use futures::future::join_all;

use crate::cancel::Cancel;
use crate::core::config::Config;
use crate::core::guard::OffGuard;
use crate::core::registry::{Entry, Registry};
use crate::error::EmitError;
use crate::events::{payload, Fault, Ident, Payload};
use crate::listeners::ListenerRef;

/// Process-local asynchronous publish/subscribe event emitter.
///
/// Cheap to clone; clones share one registry. The emitter is `Send + Sync`
/// and may be driven from any task.
///
/// ## Example
/// ```rust
/// use eventry::{payload, EventEmitter, ListenFn, Payload};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), eventry::EmitError> {
///     let emitter = EventEmitter::new();
///
///     emitter.on("greeting", ListenFn::arc(|p: Payload| async move {
///         if let Some(name) = p.downcast_ref::<&str>() {
///             println!("hello, {name}");
///         }
///         Ok(())
///     }));
///
///     emitter.emit("greeting", payload("world")).await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct EventEmitter {
    registry: Arc<Registry>,
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEmitter {
    /// Creates an emitter with [`Config::default`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an emitter with explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            registry: Arc::new(Registry::new(config.listener_warn_threshold())),
        }
    }

    // ---------------------------
    // Subscription API
    // ---------------------------

    /// Registers `listener` for `ident`; returns the handle that removes it.
    ///
    /// Registering a pointer-equal listener twice for one identifier
    /// collapses into the existing subscription (the returned guard then
    /// addresses that entry).
    pub fn on(&self, ident: impl Into<Ident>, listener: ListenerRef) -> OffGuard {
        self.subscribe(ident.into(), listener, false)
    }

    /// Like [`on`](Self::on), but the subscription removes itself *before*
    /// the listener runs: at most one invocation, even when the event fires
    /// repeatedly in the same tick or from concurrent emits.
    pub fn once(&self, ident: impl Into<Ident>, listener: ListenerRef) -> OffGuard {
        self.subscribe(ident.into(), listener, true)
    }

    /// [`on`](Self::on) with automatic removal when `cancel` triggers.
    ///
    /// Accepts a [`Cancel`] (or `&Cancel`), or a [`Duration`](std::time::Duration)
    /// for a timeout-derived signal. Fails with
    /// [`EmitError::InvalidArgument`] when the signal has already triggered;
    /// nothing is registered in that case.
    pub fn on_until(
        &self,
        ident: impl Into<Ident>,
        listener: ListenerRef,
        cancel: impl Into<Cancel>,
    ) -> Result<OffGuard, EmitError> {
        self.subscribe_until(ident.into(), listener, false, cancel.into())
    }

    /// [`once`](Self::once) with automatic removal when `cancel` triggers.
    pub fn once_until(
        &self,
        ident: impl Into<Ident>,
        listener: ListenerRef,
        cancel: impl Into<Cancel>,
    ) -> Result<OffGuard, EmitError> {
        self.subscribe_until(ident.into(), listener, true, cancel.into())
    }

    /// Bulk registration: one `on` per `(identifier, listener)` pair, one
    /// combined guard that undoes all of them.
    ///
    /// The same identifier may appear any number of times.
    pub fn on_each<I>(&self, bindings: impl IntoIterator<Item = (I, ListenerRef)>) -> OffGuard
    where
        I: Into<Ident>,
    {
        let items = bindings
            .into_iter()
            .map(|(ident, listener)| (ident.into(), listener))
            .collect();
        self.subscribe_many(items, false)
    }

    /// [`on_each`](Self::on_each) with automatic removal when `cancel`
    /// triggers. A pre-triggered signal fails before anything is registered.
    pub fn on_each_until<I>(
        &self,
        bindings: impl IntoIterator<Item = (I, ListenerRef)>,
        cancel: impl Into<Cancel>,
    ) -> Result<OffGuard, EmitError>
    where
        I: Into<Ident>,
    {
        let cancel = cancel.into();
        if cancel.is_triggered() {
            return Err(EmitError::InvalidArgument {
                reason: "cancellation already triggered before subscribe",
            });
        }
        let guard = self.on_each(bindings);
        self.watch(guard.clone(), cancel);
        Ok(guard)
    }

    /// Removes `listener` (by reference identity) from `ident`.
    ///
    /// No-op when absent. Never fails.
    pub fn off(&self, ident: impl Into<Ident>, listener: &ListenerRef) {
        let ident = ident.into();
        if self.registry.remove_listener(&ident, listener) {
            log::trace!("removed listener from '{ident}'");
        }
    }

    /// Removes every listener for `ident`. No-op when absent.
    pub fn off_event(&self, ident: impl Into<Ident>) {
        self.registry.remove_channel(&ident.into());
    }

    /// Clears the whole registry: all identifiers, all listeners.
    pub fn off_all(&self) {
        self.registry.clear();
    }

    /// Identifiers with at least one active subscription.
    ///
    /// Order is unspecified.
    pub fn event_names(&self) -> Vec<Ident> {
        self.registry.names()
    }

    /// Active subscription count for `ident` (0 when unknown).
    pub fn listener_count(&self, ident: impl Into<Ident>) -> usize {
        self.registry.count(&ident.into())
    }

    fn subscribe(&self, ident: Ident, listener: ListenerRef, once: bool) -> OffGuard {
        let id = self.registry.insert(&ident, listener, once);
        log::trace!("subscribed to '{ident}' (once={once})");
        OffGuard::new(Arc::clone(&self.registry), vec![(ident, id)])
    }

    fn subscribe_until(
        &self,
        ident: Ident,
        listener: ListenerRef,
        once: bool,
        cancel: Cancel,
    ) -> Result<OffGuard, EmitError> {
        if cancel.is_triggered() {
            return Err(EmitError::InvalidArgument {
                reason: "cancellation already triggered before subscribe",
            });
        }
        let guard = self.subscribe(ident, listener, once);
        self.watch(guard.clone(), cancel);
        Ok(guard)
    }

    pub(crate) fn subscribe_many(&self, items: Vec<(Ident, ListenerRef)>, once: bool) -> OffGuard {
        let entries = items
            .into_iter()
            .map(|(ident, listener)| {
                let id = self.registry.insert(&ident, listener, once);
                (ident, id)
            })
            .collect();
        OffGuard::new(Arc::clone(&self.registry), entries)
    }

    /// Spawns the auto-off watcher tied to `cancel`.
    ///
    /// The watcher exits as soon as either the signal triggers (removing the
    /// subscription) or the guard is released manually.
    fn watch(&self, guard: OffGuard, cancel: Cancel) {
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.triggered() => guard.off(),
                _ = guard.released() => {}
            }
        });
    }

    // ---------------------------
    // Dispatch engine
    // ---------------------------

    /// Fan-out dispatch: starts every listener concurrently in registration
    /// order and settles after all of them have.
    ///
    /// - Zero listeners on an ordinary identifier: `Ok(())`, no effect.
    /// - Zero listeners on `"error"`: [`EmitError::Unobserved`] carrying the
    ///   payload — an error event must not be silently swallowed.
    /// - Listener failures go through the error-propagation protocol; when
    ///   one still reaches the caller, the *first in registration order* is
    ///   returned and any siblings are logged at `warn`.
    ///
    /// Completion order across listeners is not guaranteed; use
    /// [`emit_serial`](Self::emit_serial) for strict sequencing.
    pub async fn emit(&self, ident: impl Into<Ident>, data: Payload) -> Result<(), EmitError> {
        let ident = ident.into();
        let snapshot = self.registry.snapshot(&ident);
        if snapshot.is_empty() {
            return self.emit_to_nobody(&ident, data);
        }

        let raw = ident.is_error() || ident.is_monitor();
        let calls = snapshot.into_iter().map(|entry| {
            let ident = &ident;
            let data = Arc::clone(&data);
            async move {
                if raw {
                    self.invoke_raw(ident, entry, data).await
                } else {
                    self.invoke_wrapped(ident, entry, data).await
                }
            }
        });

        let mut first: Option<EmitError> = None;
        for outcome in join_all(calls).await {
            if let Err(err) = outcome {
                if first.is_none() {
                    first = Some(err);
                } else {
                    log::warn!("additional listener failure on '{ident}': {}", err.as_message());
                }
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Serial dispatch: invokes listeners one at a time in registration
    /// order, awaiting each, and aborts on the first failure — later
    /// listeners stay uninvoked for this call.
    ///
    /// Zero-listener behavior matches [`emit`](Self::emit).
    pub async fn emit_serial(
        &self,
        ident: impl Into<Ident>,
        data: Payload,
    ) -> Result<(), EmitError> {
        let ident = ident.into();
        let snapshot = self.registry.snapshot(&ident);
        if snapshot.is_empty() {
            return self.emit_to_nobody(&ident, data);
        }

        let raw = ident.is_error() || ident.is_monitor();
        for entry in snapshot {
            let data = Arc::clone(&data);
            if raw {
                self.invoke_raw(&ident, entry, data).await?;
            } else {
                self.invoke_wrapped(&ident, entry, data).await?;
            }
        }
        Ok(())
    }

    fn emit_to_nobody(&self, ident: &Ident, data: Payload) -> Result<(), EmitError> {
        if ident.is_error() {
            return Err(EmitError::Unobserved { fault: Fault::from_payload(data) });
        }
        log::trace!("emit on '{ident}' with no listeners");
        Ok(())
    }

    /// Invokes one snapshot entry without error-protocol wrapping.
    ///
    /// Used for `"error"`/monitor listeners and as the invocation core of the
    /// wrapped path. Skips entries removed since the snapshot; claims `once`
    /// entries so they can never double-fire.
    async fn invoke_raw(
        &self,
        ident: &Ident,
        entry: Entry,
        data: Payload,
    ) -> Result<(), EmitError> {
        if entry.once {
            if !self.registry.claim(ident, entry.id) {
                return Ok(());
            }
        } else if !self.registry.contains_id(ident, entry.id) {
            return Ok(());
        }
        entry
            .listener
            .on_event(data)
            .await
            .map_err(|fault| EmitError::ListenerFailed { fault })
    }

    /// Invokes one entry with the error-propagation protocol applied.
    async fn invoke_wrapped(
        &self,
        ident: &Ident,
        entry: Entry,
        data: Payload,
    ) -> Result<(), EmitError> {
        match self.invoke_raw(ident, entry, data).await {
            Err(EmitError::ListenerFailed { fault }) => self.route_failure(fault).await,
            other => other,
        }
    }

    /// Routes a raised [`Fault`]: monitor tap first, then the `"error"`
    /// channel if observed, otherwise back to the emitting caller.
    async fn route_failure(&self, fault: Fault) -> Result<(), EmitError> {
        self.tap_monitor(&fault).await;

        let error_ident = Ident::ERROR;
        let handlers = self.registry.snapshot(&error_ident);
        if handlers.is_empty() {
            return Err(EmitError::ListenerFailed { fault });
        }

        // A failure raised by an "error" listener propagates to the caller;
        // nothing re-routes it.
        let data = payload(fault);
        let calls = handlers
            .into_iter()
            .map(|entry| self.invoke_raw(&error_ident, entry, Arc::clone(&data)));
        let mut first: Option<EmitError> = None;
        for outcome in join_all(calls).await {
            if let Err(err) = outcome {
                if first.is_none() {
                    first = Some(err);
                } else {
                    log::warn!("additional 'error' listener failure: {}", err.as_message());
                }
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Delivers a fault to every monitor listener; their own failures are
    /// logged and swallowed (the tap is informational only).
    async fn tap_monitor(&self, fault: &Fault) {
        let monitor = Ident::error_monitor();
        for entry in self.registry.snapshot(&monitor) {
            let name = entry.listener.name();
            if let Err(err) = self.invoke_raw(&monitor, entry, payload(fault.clone())).await {
                log::warn!("error-monitor listener '{name}' failed: {}", err.as_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::listeners::{ListenFn, ListenerRef};

    fn noop() -> ListenerRef {
        ListenFn::arc(|_p: Payload| async { Ok(()) })
    }

    fn counting(counter: Arc<AtomicUsize>) -> ListenerRef {
        ListenFn::arc(move |_p: Payload| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    fn failing(message: &'static str) -> ListenerRef {
        ListenFn::arc(move |_p: Payload| async move { Err(Fault::msg(message)) })
    }

    #[tokio::test]
    async fn test_registration_removal_symmetry() {
        let emitter = EventEmitter::new();
        let guard = emitter.on("e", noop());
        assert_eq!(emitter.listener_count("e"), 1);
        assert_eq!(emitter.event_names(), vec![Ident::from("e")]);

        guard.off();
        assert_eq!(emitter.listener_count("e"), 0);
        assert!(emitter.event_names().is_empty());
        assert!(!guard.is_active());
    }

    #[tokio::test]
    async fn test_off_guard_is_idempotent() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        emitter.on("keep", counting(Arc::clone(&hits)));
        let guard = emitter.on("e", noop());

        guard.off();
        guard.clone().off();
        guard.off();

        // the unrelated subscription is untouched
        assert_eq!(emitter.listener_count("keep"), 1);
        emitter.emit("keep", payload(())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_once_fires_at_most_once() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        emitter.once("e", counting(Arc::clone(&hits)));

        emitter.emit("e", payload(1u8)).await.unwrap();
        emitter.emit("e", payload(2u8)).await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(emitter.event_names().is_empty());
    }

    #[tokio::test]
    async fn test_once_under_same_tick_emits() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        emitter.once("e", counting(Arc::clone(&hits)));

        let (a, b) = futures::join!(emitter.emit("e", payload(())), emitter.emit("e", payload(())));
        a.unwrap();
        b.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fanout_waits_for_slowest_and_sees_all_effects() {
        struct At {
            at: i64,
        }
        #[derive(Default)]
        struct Outcome {
            first: Option<i64>,
            second: Option<i64>,
        }

        let emitter = EventEmitter::new();
        let outcome = Arc::new(Mutex::new(Outcome::default()));

        let o1 = Arc::clone(&outcome);
        emitter.on(
            "e",
            ListenFn::arc(move |p: Payload| {
                let o1 = Arc::clone(&o1);
                async move {
                    let at = p.downcast_ref::<At>().map(|a| a.at).unwrap_or(0);
                    o1.lock().unwrap().first = Some(at);
                    Ok(())
                }
            }),
        );

        let o2 = Arc::clone(&outcome);
        emitter.on(
            "e",
            ListenFn::arc(move |p: Payload| {
                let o2 = Arc::clone(&o2);
                async move {
                    let at = p.downcast_ref::<At>().map(|a| a.at).unwrap_or(0);
                    tokio::time::sleep(Duration::from_millis(25)).await;
                    o2.lock().unwrap().second = Some(2 * at);
                    Ok(())
                }
            }),
        );

        emitter.emit("e", payload(At { at: 2000 })).await.unwrap();

        let outcome = outcome.lock().unwrap();
        assert_eq!(outcome.first, Some(2000));
        assert_eq!(outcome.second, Some(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fanout_starts_in_registration_order() {
        let emitter = EventEmitter::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 1..=3 {
            let order = Arc::clone(&order);
            emitter.on(
                "e",
                ListenFn::arc(move |_p: Payload| {
                    let order = Arc::clone(&order);
                    async move {
                        order.lock().unwrap().push(n);
                        // suspend so siblings interleave
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        Ok(())
                    }
                }),
            );
        }

        emitter.emit("e", payload(())).await.unwrap();
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_without_error_listener_rejects() {
        let emitter = EventEmitter::new();
        emitter.on("x", failing("kaput"));

        let err = emitter.emit("x", payload(())).await.unwrap_err();
        match err {
            EmitError::ListenerFailed { fault } => assert_eq!(fault.message(), "kaput"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_with_error_listener_is_handled() {
        let emitter = EventEmitter::new();
        emitter.on("x", failing("kaput"));

        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&seen);
        emitter.on(
            Ident::ERROR,
            ListenFn::arc(move |p: Payload| {
                let sink = Arc::clone(&sink);
                async move {
                    let fault = Fault::from_payload(p);
                    sink.lock().unwrap().push(fault.message().to_string());
                    Ok(())
                }
            }),
        );

        emitter.emit("x", payload(())).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["kaput".to_string()]);
    }

    #[tokio::test]
    async fn test_monitor_taps_regardless_of_error_listener() {
        let emitter = EventEmitter::new();
        emitter.on("x", failing("observed"));

        let tapped = Arc::new(AtomicUsize::new(0));
        emitter.on(Ident::error_monitor(), counting(Arc::clone(&tapped)));

        // no "error" listener: emit rejects, monitor still observed it
        assert!(emitter.emit("x", payload(())).await.is_err());
        assert_eq!(tapped.load(Ordering::SeqCst), 1);

        // with an "error" listener: emit resolves, monitor observed again
        emitter.on(Ident::ERROR, noop());
        emitter.emit("x", payload(())).await.unwrap();
        assert_eq!(tapped.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unobserved_error_emit_rejects_with_payload() {
        let emitter = EventEmitter::new();
        let err = emitter.emit(Ident::ERROR, payload(41u64)).await.unwrap_err();
        match err {
            EmitError::Unobserved { fault } => assert_eq!(fault.downcast_ref::<u64>(), Some(&41)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_listener_failure_reaches_caller() {
        let emitter = EventEmitter::new();
        emitter.on("x", failing("original"));
        emitter.on(Ident::ERROR, failing("secondary"));

        let err = emitter.emit("x", payload(())).await.unwrap_err();
        match err {
            EmitError::ListenerFailed { fault } => assert_eq!(fault.message(), "secondary"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fanout_surfaces_first_registered_failure() {
        let emitter = EventEmitter::new();
        emitter.on(
            "e",
            ListenFn::arc(|_p: Payload| async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Err(Fault::msg("slow first"))
            }),
        );
        emitter.on("e", failing("fast second"));

        // the fast failer settles first, but registration order decides
        let err = emitter.emit("e", payload(())).await.unwrap_err();
        match err {
            EmitError::ListenerFailed { fault } => assert_eq!(fault.message(), "slow first"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failing_monitor_listener_is_swallowed() {
        let emitter = EventEmitter::new();
        emitter.on("x", failing("original"));
        emitter.on(Ident::error_monitor(), failing("tap broke"));

        let handled = Arc::new(AtomicUsize::new(0));
        emitter.on(Ident::ERROR, counting(Arc::clone(&handled)));

        // the broken tap neither fails the emit nor blocks redelivery
        emitter.emit("x", payload(())).await.unwrap();
        assert_eq!(handled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_serial_aborts_on_first_failure() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        emitter.on("e", failing("stop here"));
        emitter.on("e", counting(Arc::clone(&hits)));

        assert!(emitter.emit_serial("e", payload(())).await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_serial_skips_listener_removed_mid_dispatch() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let victim = counting(Arc::clone(&hits));

        let em = emitter.clone();
        let v = victim.clone();
        emitter.on(
            "e",
            ListenFn::arc(move |_p: Payload| {
                let em = em.clone();
                let v = v.clone();
                async move {
                    em.off("e", &v);
                    Ok(())
                }
            }),
        );
        emitter.on("e", victim);

        emitter.emit_serial("e", payload(())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.listener_count("e"), 1);
    }

    #[tokio::test]
    async fn test_subscription_during_dispatch_not_invoked() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let em = emitter.clone();
        let late_hits = Arc::clone(&hits);
        emitter.on(
            "e",
            ListenFn::arc(move |_p: Payload| {
                let em = em.clone();
                let late_hits = Arc::clone(&late_hits);
                async move {
                    em.on("e", counting(late_hits));
                    Ok(())
                }
            }),
        );

        emitter.emit("e", payload(())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        emitter.emit("e", payload(())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_reference_collapses() {
        let emitter = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let listener = counting(Arc::clone(&hits));

        let first = emitter.on("e", listener.clone());
        let second = emitter.on("e", listener.clone());
        assert_eq!(emitter.listener_count("e"), 1);

        emitter.emit("e", payload(())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // either guard releases the single collapsed entry
        second.off();
        assert_eq!(emitter.listener_count("e"), 0);
        first.off();
    }

    #[tokio::test]
    async fn test_off_modes() {
        let emitter = EventEmitter::new();
        let a = noop();
        emitter.on("e", a.clone());
        emitter.on("e", noop());
        emitter.on("other", noop());

        emitter.off("e", &a);
        assert_eq!(emitter.listener_count("e"), 1);

        emitter.off_event("e");
        assert_eq!(emitter.listener_count("e"), 0);
        assert_eq!(emitter.listener_count("other"), 1);

        emitter.off_all();
        assert!(emitter.event_names().is_empty());
    }

    #[tokio::test]
    async fn test_emit_with_no_listeners_is_ok() {
        let emitter = EventEmitter::new();
        emitter.emit("nobody-home", payload(())).await.unwrap();
        emitter.emit_serial(7i64, payload(())).await.unwrap();
    }

    #[tokio::test]
    async fn test_on_until_pre_triggered_fails_synchronously() {
        let emitter = EventEmitter::new();
        let cancel = Cancel::new();
        cancel.trigger();

        let err = emitter.on_until("e", noop(), &cancel).unwrap_err();
        assert_eq!(err.as_label(), "invalid_argument");
        assert!(emitter.event_names().is_empty());
    }

    #[tokio::test]
    async fn test_on_until_auto_removes_on_trigger() {
        let emitter = EventEmitter::new();
        let cancel = Cancel::new();
        let guard = emitter.on_until("e", noop(), &cancel).unwrap();
        assert!(guard.is_active());

        cancel.trigger();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!guard.is_active());
        assert_eq!(emitter.listener_count("e"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_until_accepts_duration() {
        let emitter = EventEmitter::new();
        let guard = emitter
            .on_until("e", noop(), Duration::from_millis(30))
            .unwrap();
        assert!(guard.is_active());

        tokio::time::sleep(Duration::from_millis(40)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!guard.is_active());
    }

    #[tokio::test]
    async fn test_once_until_fires_at_most_once() {
        let emitter = EventEmitter::new();
        let cancel = Cancel::new();
        let hits = Arc::new(AtomicUsize::new(0));
        emitter
            .once_until("e", counting(Arc::clone(&hits)), &cancel)
            .unwrap();

        emitter.emit("e", payload(())).await.unwrap();
        emitter.emit("e", payload(())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_once_until_removed_on_trigger_without_firing() {
        let emitter = EventEmitter::new();
        let cancel = Cancel::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let guard = emitter
            .once_until("e", counting(Arc::clone(&hits)), &cancel)
            .unwrap();

        cancel.trigger();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!guard.is_active());

        emitter.emit("e", payload(())).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_on_each_combined_guard() {
        let emitter = EventEmitter::new();
        let guard = emitter.on_each(vec![
            ("a", noop()),
            ("b", noop()),
            ("b", noop()),
        ]);
        assert_eq!(emitter.listener_count("a"), 1);
        assert_eq!(emitter.listener_count("b"), 2);

        guard.off();
        assert!(emitter.event_names().is_empty());
    }

    #[tokio::test]
    async fn test_on_each_until_pre_triggered() {
        let emitter = EventEmitter::new();
        let cancel = Cancel::new();
        cancel.trigger();

        assert!(emitter
            .on_each_until(vec![("a", noop())], &cancel)
            .is_err());
        assert!(emitter.event_names().is_empty());
    }
}

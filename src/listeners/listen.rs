//! # Core listener trait.
//!
//! `Listen` is the extension point for attaching behavior to event channels.
//! A listener receives the emitted [`Payload`] and either completes or raises
//! a [`Fault`], which the dispatch engine routes through the
//! error-propagation protocol (unless the listener sits on the `"error"` or
//! error-monitor channel, where it runs unwrapped).
//!
//! ## Contract
//! - Invocations may suspend; the surrounding `emit` settles only after every
//!   listener's future has settled.
//! - A listener is invoked at most once per subscription per emit; `once`
//!   subscriptions are invoked at most once ever.
//! - Listeners may freely call back into the emitter (subscribe, unsubscribe,
//!   emit) — dispatch works on a snapshot and is not corrupted by it.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use eventry::{Fault, Listen, Payload};
//!
//! struct Counter;
//!
//! #[async_trait]
//! impl Listen for Counter {
//!     async fn on_event(&self, payload: Payload) -> Result<(), Fault> {
//!         let _ = payload;
//!         // count something...
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::{Fault, Payload};

/// Outcome of one listener invocation.
pub type ListenResult = Result<(), Fault>;

/// # Asynchronous event listener.
///
/// Implementors handle one emitted payload per call. Raise a [`Fault`] to
/// signal failure; the emitter decides where it goes (monitor tap, `"error"`
/// channel, or the emitting caller).
#[async_trait]
pub trait Listen: Send + Sync + 'static {
    /// Handles a single emitted payload.
    async fn on_event(&self, payload: Payload) -> ListenResult;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared listener handle.
///
/// Registration identity: two `ListenerRef`s are the *same* listener exactly
/// when they point at the same allocation (`Arc::ptr_eq`). Registering the
/// same handle twice for one identifier collapses to a single subscription.
pub type ListenerRef = Arc<dyn Listen>;

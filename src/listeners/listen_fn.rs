//! # Function-backed listener (`ListenFn`).
//!
//! [`ListenFn`] wraps a closure `F: Fn(Payload) -> Fut`, producing a fresh
//! future per invocation. This keeps listener state out of the emitter; if an
//! invocation needs shared state, capture an `Arc<...>` explicitly inside the
//! closure.
//!
//! ## Example
//! ```rust
//! use eventry::{payload, Fault, ListenFn, ListenerRef, Payload};
//!
//! let l: ListenerRef = ListenFn::arc(|p: Payload| async move {
//!     match p.downcast_ref::<u64>() {
//!         Some(n) if *n > 0 => Ok(()),
//!         _ => Err(Fault::msg("expected a positive u64")),
//!     }
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Payload;
use crate::listeners::listen::{Listen, ListenResult, ListenerRef};

/// Function-backed listener implementation.
///
/// Wraps a closure that *creates* a new future per invocation.
#[derive(Debug)]
pub struct ListenFn<F> {
    f: F,
}

impl<F> ListenFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenFn::arc`] when you immediately need a [`ListenerRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> ListenFn<F>
where
    F: Fn(Payload) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ListenResult> + Send + 'static,
{
    /// Creates the listener and returns it as a shared handle.
    ///
    /// Each call to `arc` produces a listener with its own registration
    /// identity, even for textually identical closures.
    pub fn arc(f: F) -> ListenerRef {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Listen for ListenFn<F>
where
    F: Fn(Payload) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = ListenResult> + Send + 'static,
{
    async fn on_event(&self, payload: Payload) -> ListenResult {
        (self.f)(payload).await
    }
}

//! # eventry
//!
//! **Eventry** is a typed, asynchronous publish/subscribe event emitter for
//! Rust: a process-local notification bus meant to be embedded inside larger
//! systems (servers, pipelines, state machines) rather than used standalone.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌────────────┐    ┌────────────┐    ┌────────────┐
//!  │  Listener  │    │  Listener  │    │  Listener  │
//!  │ (on/once)  │    │ (on/once)  │    │ (on/once)  │
//!  └─────┬──────┘    └─────┬──────┘    └─────┬──────┘
//!        ▼                 ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  EventEmitter                                                 │
//! │  - Registry (ident → ordered subscriptions, pruned on empty)  │
//! │  - Dispatch (fan-out emit / serial emit, snapshot-based)      │
//! │  - Error protocol ("error" channel + passive error-monitor)   │
//! │  - Wait/race helpers (once + timeout/cancellation select)     │
//! └──────┬──────────────────────┬──────────────────────┬──────────┘
//!        │ emit(ident, payload) │ Fault raised         │ wait/race
//!        ▼                      ▼                      ▼
//!   all listeners for     error-monitor tap,      first event (or
//!   ident, started in     then "error" channel    abort) resolves
//!   registration order    or emitting caller      the pending future
//! ```
//!
//! ### Dispatch semantics
//! ```text
//! emit(ident, payload)
//!   ├─► snapshot listener list (additions during dispatch wait their turn)
//!   ├─► once entries claim themselves before running (at-most-once, always)
//!   ├─► fan-out: all started in registration order, settles after slowest
//!   │     └─ first failure (registration order) surfaces; siblings logged
//!   └─► serial variant: one at a time, aborts on first failure
//!
//! listener Fault
//!   ├─► error-monitor listeners observe it (passive, never affects routing)
//!   ├─► "error" has listeners ─► redelivered there, original emit is clean
//!   └─► otherwise ─► emit fails with ListenerFailed
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types                              |
//! |-------------------|-----------------------------------------------------------|----------------------------------------|
//! | **Subscription**  | Register/remove listeners, bulk form, auto-off on cancel. | [`EventEmitter`], [`OffGuard`]         |
//! | **Dispatch**      | Concurrent or serial delivery with snapshot isolation.    | [`EventEmitter::emit`], [`emit_serial`](EventEmitter::emit_serial) |
//! | **Error routing** | `"error"` channel, passive monitor tap, loop prevention.  | [`Ident::ERROR`], [`Ident::error_monitor`] |
//! | **Waiting**       | One-shot waits and races with timeout/cancellation.       | [`wait_for`](EventEmitter::wait_for), [`race_for`](EventEmitter::race_for), [`Limit`] |
//! | **Cancellation**  | Explicit tokens, timer-derived tokens.                    | [`Cancel`]                             |
//! | **Errors**        | Typed failures with stable log labels.                    | [`EmitError`], [`AbortReason`], [`Fault`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogTap`] listener _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use eventry::{payload, EventEmitter, ListenFn, Payload};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), eventry::EmitError> {
//!     let emitter = EventEmitter::new();
//!
//!     // React to every "job-done" event.
//!     emitter.on("job-done", ListenFn::arc(|p: Payload| async move {
//!         if let Some(id) = p.downcast_ref::<u64>() {
//!             println!("job {id} finished");
//!         }
//!         Ok(())
//!     }));
//!
//!     // Wait for the first "job-done" (bounded), emitting concurrently.
//!     let waiter = emitter.clone();
//!     let (got, sent) = tokio::join!(
//!         waiter.wait_for("job-done", Duration::from_secs(1)),
//!         emitter.emit("job-done", payload(17u64)),
//!     );
//!     sent?;
//!     assert_eq!(got?.downcast_ref::<u64>(), Some(&17));
//!     Ok(())
//! }
//! ```

mod cancel;
mod core;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use cancel::{Cancel, Limit};
pub use self::core::{Config, EventEmitter, OffGuard};
pub use error::{AbortReason, EmitError};
pub use events::{payload, Fault, Ident, Payload, Token};
pub use listeners::{Listen, ListenFn, ListenResult, ListenerRef};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogTap;

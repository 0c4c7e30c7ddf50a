//! # Event listeners.
//!
//! This module provides the [`Listen`] trait, the [`ListenFn`] closure
//! adapter, and (behind the `logging` feature) the [`LogTap`] diagnostic
//! listener.
//!
//! ## Architecture
//! ```text
//! Payload flow:
//!   emit(ident, payload) ──► Registry snapshot ──► per-entry invocation
//!                                                      │
//!                                                      ├──► Listen::on_event(payload)
//!                                                      │         │
//!                                                      │     Ok(()) ─► done
//!                                                      │     Err(Fault)
//!                                                      │         │
//!                                                      │         ├──► error-monitor tap
//!                                                      │         └──► "error" channel or caller
//!                                                      └──► (once entries claimed first)
//! ```
//!
//! ## Listener kinds
//! - **Trait impls** — stateful listeners implementing [`Listen`] directly.
//! - **Closures** — [`ListenFn::arc`] for ad-hoc handlers.

mod listen;
mod listen_fn;

#[cfg(feature = "logging")]
mod log;

pub use listen::{Listen, ListenResult, ListenerRef};
pub use listen_fn::ListenFn;

#[cfg(feature = "logging")]
pub use self::log::LogTap;

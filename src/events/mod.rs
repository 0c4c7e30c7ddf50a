//! Event data model: identifiers and payloads.
//!
//! This module groups the types that name event channels and carry event
//! data through dispatch.
//!
//! ## Contents
//! - [`Ident`], [`Token`] — channel identifiers (value- or identity-keyed)
//! - [`Payload`], [`payload`] — opaque per-emit data
//! - [`Fault`] — the value a failing listener raises
//!
//! ## Quick reference
//! - **Reserved channels**: [`Ident::ERROR`] (handling) and
//!   [`Ident::error_monitor`] (passive observation).
//! - **Producers**: callers of `emit`; the dispatch engine itself when it
//!   redelivers a [`Fault`] to the `"error"` channel.
//! - **Consumers**: listeners (see [`crate::listeners`]) and the wait/race
//!   helpers, which resolve with the winning [`Payload`].

mod ident;
mod payload;

pub use ident::{Ident, Token};
pub use payload::{payload, Fault, Payload};

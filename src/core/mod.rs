//! Emitter internals and public surface.
//!
//! ## Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  EventEmitter (emitter.rs)                                  │
//! │  - subscription API: on / once / *_until / on_each / off    │
//! │  - dispatch: emit (fan-out) / emit_serial                   │
//! │  - error-propagation protocol (monitor tap, "error" route)  │
//! │  - wait / race / throw_on_error (waiting.rs)                │
//! └──────┬────────────────────────────┬─────────────────────────┘
//!        ▼                            ▼
//!   Registry (registry.rs)       OffGuard (guard.rs)
//!   ident → ordered entries      idempotent removal handle
//!   snapshot / claim / prune
//! ```
//!
//! [`Config`] (config.rs) carries the only tunable: the listener-leak
//! warning threshold.

mod config;
mod emitter;
mod guard;
mod registry;
mod waiting;

pub use config::Config;
pub use emitter::EventEmitter;
pub use guard::OffGuard;

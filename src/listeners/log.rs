//! # Simple logging listener for debugging and demos.
//!
//! [`LogTap`] writes everything it sees to the `log` facade. Attach it to the
//! error-monitor channel to surface listener failures during development:
//!
//! ```no_run
//! use std::sync::Arc;
//! use eventry::{EventEmitter, Ident, LogTap};
//!
//! let emitter = EventEmitter::new();
//! emitter.on(Ident::error_monitor(), Arc::new(LogTap));
//! ```
//!
//! Not intended for production use — implement a custom [`Listen`] for
//! structured diagnostics or metrics collection.

use async_trait::async_trait;

use crate::events::{Fault, Payload};
use crate::listeners::listen::{Listen, ListenResult};

/// Logging listener.
///
/// Enabled via the `logging` feature. Faults are logged at `warn`, any other
/// payload at `debug`.
pub struct LogTap;

#[async_trait]
impl Listen for LogTap {
    async fn on_event(&self, payload: Payload) -> ListenResult {
        match payload.downcast_ref::<Fault>() {
            Some(fault) => log::warn!("[tap] listener fault: {fault}"),
            None => log::debug!("[tap] event payload observed"),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log-tap"
    }
}

//! # Subscription cancellation handle.
//!
//! Every registration returns an [`OffGuard`]; calling [`OffGuard::off`]
//! removes exactly the subscriptions it was returned for. Bulk registration
//! and race arming return one guard covering several entries.
//!
//! A guard does nothing on drop — releasing a subscription is always an
//! explicit act, and clones of a guard address the same entries.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::registry::Registry;
use crate::events::Ident;

/// Handle that removes the subscription(s) it was returned for.
///
/// `off` is idempotent: the entries are removed at most once, and calling it
/// again (or on a clone) has no further effect. Entries already gone by
/// other means (a fired `once`, `off_event`, `off_all`) are skipped
/// silently.
#[derive(Clone)]
pub struct OffGuard {
    registry: Arc<Registry>,
    entries: Arc<Vec<(Ident, u64)>>,
    done: CancellationToken,
}

impl OffGuard {
    pub(crate) fn new(registry: Arc<Registry>, entries: Vec<(Ident, u64)>) -> Self {
        Self {
            registry,
            entries: Arc::new(entries),
            done: CancellationToken::new(),
        }
    }

    /// Removes the covered subscriptions. Idempotent, never fails.
    pub fn off(&self) {
        for (ident, id) in self.entries.iter() {
            if self.registry.remove_id(ident, *id) {
                log::trace!("unsubscribed from '{ident}'");
            }
        }
        self.done.cancel();
    }

    /// True while at least one covered subscription is still registered.
    pub fn is_active(&self) -> bool {
        self.entries
            .iter()
            .any(|(ident, id)| self.registry.contains_id(ident, *id))
    }

    /// Completes once [`off`](Self::off) has been called on any clone.
    ///
    /// Lets auto-off watchers stop waiting when the guard is released
    /// manually first.
    pub(crate) async fn released(&self) {
        self.done.cancelled().await;
    }
}

impl std::fmt::Debug for OffGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffGuard")
            .field("entries", &self.entries.len())
            .field("active", &self.is_active())
            .finish()
    }
}

//! # Subscription registry.
//!
//! The registry owns the mapping from event identifier to the ordered list of
//! active subscriptions. It is the sole source of truth for "is this event
//! being listened to": `event_names()` and `listener_count()` derive from it
//! directly.
//!
//! ## Rules
//! - Entries for one identifier keep registration order.
//! - Registering a pointer-equal listener twice for the same identifier
//!   collapses into the existing entry (ordered-set semantics).
//! - An identifier never maps to an empty list: the slot is pruned on last
//!   removal.
//! - Dispatch reads a [`snapshot`](Registry::snapshot) (a copy, not a live
//!   view); `once` entries are [`claim`](Registry::claim)ed — removed
//!   atomically before invocation — so concurrent emits cannot double-fire
//!   them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::events::Ident;
use crate::listeners::ListenerRef;

/// One active subscription.
#[derive(Clone)]
pub(crate) struct Entry {
    /// Unique id; removal and liveness checks go through it.
    pub id: u64,
    /// The registered listener.
    pub listener: ListenerRef,
    /// Remove-before-invoke marker (`once` subscriptions).
    pub once: bool,
}

/// Identifier → ordered subscriptions map.
pub(crate) struct Registry {
    channels: DashMap<Ident, Vec<Entry>>,
    seq: AtomicU64,
    warn_threshold: Option<usize>,
}

impl Registry {
    pub fn new(warn_threshold: Option<usize>) -> Self {
        Self {
            channels: DashMap::new(),
            seq: AtomicU64::new(0),
            warn_threshold,
        }
    }

    /// Registers a listener; returns the live entry id.
    ///
    /// Collapses onto an existing entry when `listener` is pointer-equal to
    /// one already registered for `ident` (the existing entry's `once` flag
    /// is kept).
    pub fn insert(&self, ident: &Ident, listener: ListenerRef, once: bool) -> u64 {
        let mut slot = self.channels.entry(ident.clone()).or_default();
        if let Some(existing) = slot.iter().find(|e| Arc::ptr_eq(&e.listener, &listener)) {
            log::trace!("collapsed duplicate registration on '{ident}'");
            return existing.id;
        }

        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        slot.push(Entry { id, listener, once });

        if let Some(threshold) = self.warn_threshold {
            if slot.len() > threshold {
                log::warn!(
                    "possible listener leak: {} listeners on '{ident}' (threshold {threshold})",
                    slot.len(),
                );
            }
        }
        id
    }

    /// Removes the entry with `id`, pruning the slot if it empties.
    ///
    /// Returns whether the entry was still present (idempotent).
    pub fn remove_id(&self, ident: &Ident, id: u64) -> bool {
        let removed = match self.channels.get_mut(ident) {
            Some(mut slot) => match slot.iter().position(|e| e.id == id) {
                Some(pos) => {
                    slot.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        };
        if removed {
            self.prune(ident);
        }
        removed
    }

    /// Removes the entry holding a pointer-equal listener.
    pub fn remove_listener(&self, ident: &Ident, listener: &ListenerRef) -> bool {
        let removed = match self.channels.get_mut(ident) {
            Some(mut slot) => {
                match slot.iter().position(|e| Arc::ptr_eq(&e.listener, listener)) {
                    Some(pos) => {
                        slot.remove(pos);
                        true
                    }
                    None => false,
                }
            }
            None => false,
        };
        if removed {
            self.prune(ident);
        }
        removed
    }

    /// Removes every entry for `ident`.
    pub fn remove_channel(&self, ident: &Ident) {
        self.channels.remove(ident);
    }

    /// Removes everything.
    pub fn clear(&self) {
        self.channels.clear();
    }

    /// Copy of the current entries for `ident`, in registration order.
    pub fn snapshot(&self, ident: &Ident) -> Vec<Entry> {
        self.channels
            .get(ident)
            .map(|slot| slot.clone())
            .unwrap_or_default()
    }

    /// Atomically claims a `once` entry for invocation.
    ///
    /// True means the caller won the claim and may invoke; a second claim of
    /// the same entry (concurrent emit) loses.
    pub fn claim(&self, ident: &Ident, id: u64) -> bool {
        self.remove_id(ident, id)
    }

    /// True while the entry is still registered.
    pub fn contains_id(&self, ident: &Ident, id: u64) -> bool {
        self.channels
            .get(ident)
            .map(|slot| slot.iter().any(|e| e.id == id))
            .unwrap_or(false)
    }

    /// Identifiers with at least one active subscription.
    pub fn names(&self) -> Vec<Ident> {
        self.channels.iter().map(|e| e.key().clone()).collect()
    }

    /// Active subscription count for `ident`.
    pub fn count(&self, ident: &Ident) -> usize {
        self.channels.get(ident).map(|slot| slot.len()).unwrap_or(0)
    }

    /// Drops the slot if it went empty.
    ///
    /// Must not be called while holding a reference into `channels`.
    fn prune(&self, ident: &Ident) {
        self.channels.remove_if(ident, |_, slot| slot.is_empty());
    }
}

//! # Emitter configuration.
//!
//! Provides [`Config`], the settings for an [`EventEmitter`](crate::EventEmitter).
//!
//! The emitter reads no environment and persists nothing; configuration is
//! plain data passed to `EventEmitter::with_config`.
//!
//! ## Sentinel values
//! - `max_listeners = 0` → unlimited (no leak warning ever logged)

/// Configuration for an event emitter.
///
/// ## Field semantics
/// - `max_listeners`: per-channel listener count above which a possible-leak
///   warning is logged (`0` = unlimited). The limit is advisory only:
///   registration always succeeds.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Listener-leak warning threshold per channel.
    ///
    /// Long-lived emitters that keep accumulating listeners on one channel
    /// usually indicate a subscription that is never released. Crossing the
    /// threshold logs a `warn` naming the channel; it never rejects the
    /// registration.
    pub max_listeners: usize,
}

impl Config {
    /// Returns the warning threshold as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → warn when a channel exceeds `n` listeners
    #[inline]
    pub fn listener_warn_threshold(&self) -> Option<usize> {
        if self.max_listeners == 0 {
            None
        } else {
            Some(self.max_listeners)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `max_listeners = 10` (warn past ten listeners on one channel)
    fn default() -> Self {
        Self { max_listeners: 10 }
    }
}

//! # Event payloads and listener faults.
//!
//! [`Payload`] is the caller-supplied data attached to one emit: an opaque,
//! cheaply-cloneable `Arc<dyn Any + Send + Sync>`. The emitter never inspects
//! it and does not retain it past dispatch; its shape is a contract between
//! emitting and listening code.
//!
//! [`Fault`] is the value a listener raises: the raised payload plus a
//! human-readable message for logs and error display. Faults travel through
//! the error-propagation protocol unmodified — a listener on the `"error"`
//! channel receives the originating `Fault` as its payload, and
//! [`Fault::from_payload`] recovers it on the other side.
//!
//! ## Example
//! ```rust
//! use eventry::{payload, Fault};
//!
//! let p = payload(42u32);
//! assert_eq!(p.downcast_ref::<u32>(), Some(&42));
//!
//! let fault = Fault::msg("connection refused");
//! assert_eq!(fault.message(), "connection refused");
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Opaque payload attached to one emitted event.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Wraps a value into a [`Payload`].
pub fn payload<T: Send + Sync + 'static>(value: T) -> Payload {
    Arc::new(value)
}

/// Value raised by a failing listener.
///
/// Carries the raised payload unmodified plus a display message. Clones share
/// the payload.
#[derive(Clone)]
pub struct Fault {
    message: Cow<'static, str>,
    value: Payload,
}

impl Fault {
    /// Creates a fault carrying an arbitrary raised value.
    pub fn new(message: impl Into<Cow<'static, str>>, value: Payload) -> Self {
        Self { message: message.into(), value }
    }

    /// Creates a message-only fault; the message itself is the raised value.
    pub fn msg(message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        let value: Payload = Arc::new(message.clone().into_owned());
        Self { message, value }
    }

    /// Recovers a fault from a payload delivered on the `"error"` channel.
    ///
    /// A payload that already is a `Fault` comes back as-is; a string payload
    /// becomes a message-carrying fault; anything else is wrapped opaque.
    pub fn from_payload(value: Payload) -> Self {
        if let Some(fault) = value.downcast_ref::<Fault>() {
            return fault.clone();
        }
        let message: Cow<'static, str> = if let Some(s) = value.downcast_ref::<String>() {
            Cow::Owned(s.clone())
        } else if let Some(s) = value.downcast_ref::<&'static str>() {
            Cow::Borrowed(s)
        } else {
            Cow::Borrowed("listener failure")
        };
        Self { message, value }
    }

    /// The raised value, unmodified.
    pub fn value(&self) -> Payload {
        Arc::clone(&self.value)
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attempts to view the raised value as a concrete type.
    pub fn downcast_ref<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl From<&'static str> for Fault {
    fn from(message: &'static str) -> Self {
        Fault::msg(message)
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::msg(message)
    }
}

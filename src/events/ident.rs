//! # Event identifiers.
//!
//! [`Ident`] names an event channel. Three kinds are supported:
//! - [`Ident::Name`] — string names, compared by value (`"connected"`);
//! - [`Ident::Index`] — numeric names, compared by value;
//! - [`Ident::Token`] — unique symbolic tokens, compared by identity.
//!
//! Two identifiers carry protocol meaning:
//! - [`Ident::ERROR`] — the reserved `"error"` channel. Listener failures are
//!   redelivered here, and emitting on it with no listener attached fails the
//!   emit (see [`EmitError::Unobserved`](crate::error::EmitError::Unobserved)).
//! - [`Ident::error_monitor()`] — the passive observation channel. Listeners
//!   registered here see every listener failure but never affect how it is
//!   handled.
//!
//! Identifiers are never validated against a fixed set: any identifier is
//! legal, and emitting on one nobody listens to is not an error.
//!
//! ## Example
//! ```rust
//! use eventry::{Ident, Token};
//!
//! let a: Ident = "ready".into();
//! let b: Ident = "ready".into();
//! assert_eq!(a, b); // names compare by value
//!
//! let t1 = Token::new("internal");
//! let t2 = Token::new("internal");
//! assert_ne!(Ident::from(t1), Ident::from(t2)); // tokens compare by identity
//! ```

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Process-wide token backing [`Ident::error_monitor`].
static ERROR_MONITOR: Lazy<Token> = Lazy::new(|| Token::new("error-monitor"));

/// Unique symbolic event identifier.
///
/// A `Token` is equal only to clones of itself; the label is informational
/// (shown in logs and error messages) and does not participate in equality.
///
/// ## Example
/// ```rust
/// use eventry::Token;
///
/// let t = Token::new("session");
/// assert_eq!(t, t.clone());
/// assert_ne!(t, Token::new("session"));
/// assert_eq!(t.label(), "session");
/// ```
#[derive(Clone, Debug)]
pub struct Token(Arc<TokenInner>);

#[derive(Debug)]
struct TokenInner {
    label: Cow<'static, str>,
}

impl Token {
    /// Creates a fresh token with the given label.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(Arc::new(TokenInner { label: label.into() }))
    }

    /// Returns the informational label.
    pub fn label(&self) -> &str {
        &self.0.label
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

/// Identifier of an event channel.
///
/// Cheap to clone; used as the registry key. See the module docs for the
/// reserved identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ident {
    /// String name, value equality.
    Name(Cow<'static, str>),
    /// Numeric name, value equality.
    Index(i64),
    /// Symbolic token, identity equality.
    Token(Token),
}

impl Ident {
    /// The reserved `"error"` channel.
    pub const ERROR: Ident = Ident::Name(Cow::Borrowed("error"));

    /// Returns the process-wide passive error-monitor channel.
    pub fn error_monitor() -> Ident {
        Ident::Token(ERROR_MONITOR.clone())
    }

    /// True for the reserved `"error"` channel.
    pub fn is_error(&self) -> bool {
        *self == Self::ERROR
    }

    /// True for the error-monitor channel.
    pub fn is_monitor(&self) -> bool {
        matches!(self, Ident::Token(t) if *t == *ERROR_MONITOR)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Name(name) => write!(f, "{name}"),
            Ident::Index(n) => write!(f, "{n}"),
            Ident::Token(t) => write!(f, "<{}>", t.label()),
        }
    }
}

impl From<&'static str> for Ident {
    fn from(name: &'static str) -> Self {
        Ident::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::Name(Cow::Owned(name))
    }
}

impl From<i64> for Ident {
    fn from(n: i64) -> Self {
        Ident::Index(n)
    }
}

impl From<Token> for Ident {
    fn from(token: Token) -> Self {
        Ident::Token(token)
    }
}

impl From<&Ident> for Ident {
    fn from(ident: &Ident) -> Self {
        ident.clone()
    }
}

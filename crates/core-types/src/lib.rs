//! Shared primitives for the authoring console crates.
//!
//! Everything that talks to the live console goes through [`DomPort`]; the
//! types here are the vocabulary of that port: element handles ([`Scope`]),
//! lookup expressions ([`Selector`]) and driver failures ([`DomError`]).

use std::borrow::Cow;
use std::fmt;

mod errors;
mod ports;

#[cfg(feature = "test-support")]
pub mod fake;

pub use errors::DomError;
pub use ports::DomPort;

/// Handle to a live UI sub-tree node.
///
/// The wrapped string is the driver's element reference. A handle may become
/// stale at any time when the console re-renders the node it points to.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Scope(pub String);

impl Scope {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element:{}", self.0)
    }
}

/// Lookup expression evaluated beneath a [`Scope`].
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Selector {
    /// CSS selector, possibly a comma separated group.
    Css(Cow<'static, str>),
    /// Element kind, e.g. `input`.
    TagName(Cow<'static, str>),
}

impl Selector {
    pub const fn css(expr: &'static str) -> Self {
        Selector::Css(Cow::Borrowed(expr))
    }

    pub const fn tag(name: &'static str) -> Self {
        Selector::TagName(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selector::Css(expr) | Selector::TagName(expr) => expr,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(expr) => write!(f, "css={}", expr),
            Selector::TagName(name) => write!(f, "tag={}", name),
        }
    }
}

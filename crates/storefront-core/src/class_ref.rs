//! # Class References
//!
//! A [`ClassRef`] names one registrable implementation (a calculator, a payment method,
//! a promotion rule, ...). It is deliberately opaque: the registry only stores and
//! compares identities, and turning an identity into a live object is left to a
//! [`Catalog`](crate::Catalog).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::{self, Display};

/// Opaque identifier of a registered implementation type.
///
/// Two references are equal when their names are equal. References built with
/// [`ClassRef::of`] use the full Rust type path, so a type and a name loaded from a
/// config file refer to the same implementation when the file spells out that path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassRef(Cow<'static, str>);

impl ClassRef {
    /// Reference to a concrete Rust type.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<T>()))
    }

    /// Reference to an implementation known only by a static name.
    pub const fn named(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Reference from an owned name, e.g. one read from configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The full name, e.g. `storefront_app::calculators::shipping::FlatRate`.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The last path segment, e.g. `FlatRate`.
    pub fn short_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }

    /// Whether this reference names the Rust type `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.name() == std::any::type_name::<T>()
    }
}

impl Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ClassRef {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ClassRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

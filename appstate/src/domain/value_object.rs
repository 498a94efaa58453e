//! Value-based domain objects.

use serde::{Deserialize, Serialize};

/// Immutable wrapper whose equality is the equality of the wrapped value.
///
/// Serialises transparently as the inner value.
///
/// # Examples
/// ```
/// use appstate::domain::ValueObject;
///
/// let a = ValueObject::new("EUR".to_owned());
/// let b = ValueObject::new("EUR".to_owned());
/// assert!(a.equals(&b));
/// assert_eq!(a.value(), "EUR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueObject<V>(V);

impl<V> ValueObject<V> {
    /// Wrap a value.
    pub const fn new(value: V) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value.
    pub const fn value(&self) -> &V {
        &self.0
    }

    /// Unwrap into the owned value.
    pub fn into_inner(self) -> V {
        self.0
    }
}

impl<V: PartialEq> ValueObject<V> {
    /// Structural comparison of the wrapped values.
    pub fn equals(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<V> AsRef<V> for ValueObject<V> {
    fn as_ref(&self) -> &V {
        &self.0
    }
}

impl<V> From<V> for ValueObject<V> {
    fn from(value: V) -> Self {
        Self(value)
    }
}

//! Port for the durable key-value substrate behind persisted store fields.
//!
//! Values are addressed by store module name plus field name and carried as
//! JSON so adapters stay agnostic of each module's state shape.

use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by state storage adapters.
    pub enum StateStorageError {
        /// Backing medium could not be read or written.
        Unavailable { message: String } =>
            "state storage unavailable: {message}",
        /// Stored bytes could not be encoded or decoded.
        Serialization { message: String } =>
            "state storage serialization failed: {message}",
        /// Module or field name cannot be used as a storage key.
        InvalidKey { key: String } =>
            "invalid state storage key: {key}",
    }
}

/// Durable storage for persisted store fields.
///
/// Calls are synchronous: store actions run to completion and write through
/// while holding their module lock, which keeps writes in mutation order.
#[cfg_attr(test, mockall::automock)]
pub trait StateStorage: Send + Sync {
    /// Read a previously stored value, or `None` when nothing was written.
    fn read(&self, module: &str, field: &str) -> Result<Option<Value>, StateStorageError>;

    /// Store `value`, replacing any earlier value for the same key.
    fn write(&self, module: &str, field: &str, value: &Value) -> Result<(), StateStorageError>;

    /// Forget a stored value. Removing a missing key succeeds.
    fn remove(&self, module: &str, field: &str) -> Result<(), StateStorageError>;
}

/// Reject keys that could not round-trip through every adapter.
///
/// Keys must be non-empty and use ASCII letters, digits, `_` or `-`.
pub fn validate_key(key: &str) -> Result<(), StateStorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StateStorageError::invalid_key(key))
    }
}

//! Driven ports the stores and use cases depend on.
//!
//! Each trait exposes a strongly typed error so adapters map their failures
//! into predictable variants instead of returning stringly errors.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod state_storage;
mod theme_applier;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{
    AuthenticatedSession, Authenticator, AuthenticatorError, FixtureAuthenticator,
};
#[cfg(test)]
pub use state_storage::MockStateStorage;
pub use state_storage::{StateStorage, StateStorageError, validate_key};
#[cfg(test)]
pub use theme_applier::MockThemeApplier;
pub use theme_applier::{ThemeApplier, TracingThemeApplier};

//! Store modules and their registry.
//!
//! Each module owns one slice of application state, exposes it read-only,
//! and changes it only through its own actions. A module declares which of
//! its fields outlive the session; those are rehydrated on construction and
//! written through to [`crate::domain::ports::StateStorage`] whenever an
//! action changes them.

mod app;
mod auth;
mod registry;
mod slice;
mod ui;

pub use app::{AppState, AppStore};
pub use auth::{AuthState, AuthStore};
pub use registry::{StoreRegistry, Stores};
pub use slice::{ModulePhase, ModuleState, StoreSlice};
pub use ui::{UiState, UiStore};

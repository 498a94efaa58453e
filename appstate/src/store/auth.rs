//! Authentication store module.
//!
//! Only the bearer token is persisted. The user profile is volatile and has
//! to be fetched again after a reload; a rehydrated token alone marks the
//! session as authenticated.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::StateStorage;
use crate::domain::{AuthToken, Error, User};

use super::app::AppStore;
use super::slice::{ModulePhase, ModuleState, StoreSlice};

/// Observable authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    /// Signed-in user, when known.
    pub user: Option<User>,
    /// Whether a session is active.
    pub is_authenticated: bool,
    /// Bearer token for the active session.
    pub token: Option<AuthToken>,
}

impl ModuleState for AuthState {
    const MODULE: &'static str = "auth";
    const PERSISTED: &'static [&'static str] = &["token"];
}

/// Store module owning [`AuthState`].
pub struct AuthStore {
    slice: StoreSlice<AuthState>,
}

impl AuthStore {
    pub(crate) fn hydrate(storage: Arc<dyn StateStorage>) -> Result<Self, Error> {
        Ok(Self {
            slice: StoreSlice::hydrate(AuthState::default(), storage)?,
        })
    }

    /// Activate the module. Requires an active, initialized app module.
    pub(crate) fn initialize(&self, app: &AppStore) -> Result<(), Error> {
        if app.phase() != ModulePhase::Active || !app.is_initialized() {
            return Err(Error::initialization(
                "auth store requires the app store to be active",
            ));
        }
        let restored = self.slice.mutate("restore_session", |state| {
            if state.token.is_some() {
                state.is_authenticated = true;
            }
            state.is_authenticated
        });
        self.slice.activate()?;
        info!(restored, "auth store initialized");
        Ok(())
    }

    /// Replace the signed-in user. `None` ends the authenticated flag.
    pub fn set_user(&self, user: Option<User>) {
        self.slice.mutate("set_user", |state| {
            state.is_authenticated = user.is_some();
            state.user = user;
        });
    }

    /// Record a signed-in user and its token in one action.
    pub fn sign_in(&self, user: User, token: AuthToken) {
        self.slice.mutate("sign_in", |state| {
            state.user = Some(user);
            state.token = Some(token);
            state.is_authenticated = true;
        });
    }

    /// Replace the session token.
    pub fn set_token(&self, token: Option<AuthToken>) {
        self.slice.mutate("set_token", |state| state.token = token);
    }

    /// Clear the user, the token, and the authenticated flag.
    pub fn logout(&self) {
        self.slice.mutate("logout", |state| *state = AuthState::default());
        info!("signed out");
    }

    /// Whether a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.slice.read(|state| state.is_authenticated)
    }

    /// Signed-in user, when known.
    pub fn user(&self) -> Option<User> {
        self.slice.read(|state| state.user.clone())
    }

    /// Current session token.
    pub fn token(&self) -> Option<AuthToken> {
        self.slice.read(|state| state.token.clone())
    }

    /// Clone of the module state.
    pub fn snapshot(&self) -> AuthState {
        self.slice.snapshot()
    }

    /// Lifecycle phase of the module.
    pub fn phase(&self) -> ModulePhase {
        self.slice.phase()
    }

    pub(crate) fn dispose(&self) {
        self.slice.dispose();
    }
}

//! Sign-in use case.
//!
//! Validates raw credentials, asks the [`Authenticator`] port to verify
//! them, and records the resulting user and token in the auth store.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{Authenticator, AuthenticatorError};
use crate::domain::{Error, LoginCredentials, Outcome, UseCase, UserId};
use crate::store::{Stores, UiStore};

/// Raw sign-in form input.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInRequest {
    /// Username as typed.
    pub username: String,
    /// Password as typed.
    pub password: String,
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful sign-in payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInResponse {
    /// Identifier of the signed-in user.
    pub user_id: UserId,
}

fn map_authenticator_error(error: AuthenticatorError) -> Error {
    match error {
        AuthenticatorError::Unavailable { message } => {
            Error::service_unavailable(format!("authenticator unavailable: {message}"))
        }
        AuthenticatorError::InvalidResponse { message } => {
            Error::internal(format!("authenticator returned an invalid response: {message}"))
        }
    }
}

/// Holds the ui loading flag up until dropped, including on cancellation.
struct LoadingGuard<'a> {
    ui: &'a UiStore,
}

impl<'a> LoadingGuard<'a> {
    fn raise(ui: &'a UiStore) -> Self {
        ui.set_loading(true);
        Self { ui }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.ui.set_loading(false);
    }
}

/// Signs a user in and stores the session.
#[derive(Clone)]
pub struct SignInUseCase<A> {
    authenticator: Arc<A>,
    stores: Stores,
}

impl<A> SignInUseCase<A> {
    /// Create the use case over an authenticator and the session stores.
    pub fn new(authenticator: Arc<A>, stores: Stores) -> Self {
        Self {
            authenticator,
            stores,
        }
    }
}

#[async_trait]
impl<A> UseCase for SignInUseCase<A>
where
    A: Authenticator,
{
    type Request = SignInRequest;
    type Response = SignInResponse;

    async fn execute(&self, request: SignInRequest) -> Result<Outcome<SignInResponse>, Error> {
        let credentials =
            match LoginCredentials::try_from_parts(&request.username, &request.password) {
                Ok(credentials) => credentials,
                Err(err) => return Ok(Outcome::fail(err.to_string())),
            };

        let verdict = {
            let _loading = LoadingGuard::raise(self.stores.ui());
            self.authenticator.authenticate(&credentials).await
        };

        let Some(session) = verdict.map_err(map_authenticator_error)? else {
            return Ok(Outcome::fail("invalid username or password"));
        };

        let user_id = session.user.id().clone();
        self.stores.auth().sign_in(session.user, session.token);
        info!(user_id = %user_id, "signed in");
        Ok(Outcome::ok(SignInResponse { user_id }))
    }
}

#[cfg(test)]
#[path = "sign_in_tests.rs"]
mod tests;

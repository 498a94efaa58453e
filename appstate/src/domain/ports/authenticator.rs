//! Driven port checking sign-in credentials.
//!
//! Rejected credentials are an expected outcome and come back as `Ok(None)`;
//! only infrastructure trouble is reported through [`AuthenticatorError`].

use async_trait::async_trait;

use crate::domain::{AuthToken, LoginCredentials, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by authenticator adapters.
    pub enum AuthenticatorError {
        /// The identity provider could not be reached.
        Unavailable { message: String } =>
            "authenticator unavailable: {message}",
        /// The provider answered with something unusable.
        InvalidResponse { message: String } =>
            "authenticator returned an invalid response: {message}",
    }
}

/// User and bearer token issued for accepted credentials.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// The signed-in user.
    pub user: User,
    /// Token to persist for later requests.
    pub token: AuthToken,
}

/// Port for credential verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify credentials, returning a session when they are accepted.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<AuthenticatedSession>, AuthenticatorError>;
}

const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// In-memory authenticator for development and tests.
///
/// Accepts `admin` / `password` and issues a fixed user and token.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthenticator;

#[async_trait]
impl Authenticator for FixtureAuthenticator {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<AuthenticatedSession>, AuthenticatorError> {
        if credentials.username() != "admin" || credentials.password() != "password" {
            return Ok(None);
        }
        let user = User::try_from_strings(FIXTURE_USER_ID, "admin@example.org", "Administrator")
            .map_err(|err| AuthenticatorError::invalid_response(err.to_string()))?;
        let token = AuthToken::new("fixture-admin-token")
            .map_err(|err| AuthenticatorError::invalid_response(err.to_string()))?;
        Ok(Some(AuthenticatedSession { user, token }))
    }
}

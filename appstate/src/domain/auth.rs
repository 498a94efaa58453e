//! Authentication values: sign-in credentials and bearer tokens.
//!
//! Both types keep their secret material in [`Zeroizing`] buffers so it is
//! wiped when dropped, and neither prints secrets through `Debug`.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Errors raised when authentication values fail validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Token was empty or contained whitespace.
    #[error("auth token must be a non-empty string without whitespace")]
    MalformedToken,
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw username/password inputs.
    ///
    /// # Examples
    /// ```
    /// use appstate::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::try_from_parts(" admin ", "password").unwrap();
    /// assert_eq!(creds.username(), "admin");
    /// ```
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AuthValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token persisted by the auth store.
///
/// Serialises as the raw token string because it must survive a reload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Validate and wrap a token.
    pub fn new(token: impl Into<String>) -> Result<Self, AuthValidationError> {
        let token = Zeroizing::new(token.into());
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(AuthValidationError::MalformedToken);
        }
        Ok(Self(token))
    }

    /// Expose the secret for transport headers.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0.as_str().to_owned()
    }
}

impl TryFrom<String> for AuthToken {
    type Error = AuthValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

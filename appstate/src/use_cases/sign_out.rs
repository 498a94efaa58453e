//! Sign-out use case.

use async_trait::async_trait;

use crate::domain::{Error, Outcome, UseCase};
use crate::store::Stores;

/// Ends the current session.
#[derive(Clone)]
pub struct SignOutUseCase {
    stores: Stores,
}

impl SignOutUseCase {
    /// Create the use case over the session stores.
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl UseCase for SignOutUseCase {
    type Request = ();
    type Response = ();

    async fn execute(&self, _request: ()) -> Result<Outcome<()>, Error> {
        let auth = self.stores.auth();
        if !auth.is_authenticated() {
            return Ok(Outcome::fail("no user is signed in"));
        }
        auth.logout();
        Ok(Outcome::ok(()))
    }
}

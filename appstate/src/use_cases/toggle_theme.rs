//! Theme toggle use case.

use async_trait::async_trait;

use crate::domain::{Error, Outcome, Theme, UseCase};
use crate::store::Stores;

/// Flips the UI theme and reports the new one.
#[derive(Clone)]
pub struct ToggleThemeUseCase {
    stores: Stores,
}

impl ToggleThemeUseCase {
    /// Create the use case over the session stores.
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl UseCase for ToggleThemeUseCase {
    type Request = ();
    type Response = Theme;

    async fn execute(&self, _request: ()) -> Result<Outcome<Theme>, Error> {
        Ok(Outcome::ok(self.stores.ui().toggle_theme()))
    }
}

//! Composition root for the store modules.
//!
//! The registry owns the storage and theme adapters, builds each module
//! exactly once per session, and hands out a cheap [`Stores`] handle.
//! Initialization order is fixed: `app`, then `auth` (which depends on an
//! active `app`), then `ui`. The first failure aborts the whole sequence.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info};

use crate::domain::Error;
use crate::domain::ports::{StateStorage, ThemeApplier};

use super::app::AppStore;
use super::auth::AuthStore;
use super::ui::UiStore;

/// Handle to the initialized store modules.
///
/// Clones share the same modules.
#[derive(Clone)]
pub struct Stores {
    app: Arc<AppStore>,
    auth: Arc<AuthStore>,
    ui: Arc<UiStore>,
}

impl Stores {
    /// Application module.
    pub fn app(&self) -> &AppStore {
        &self.app
    }

    /// Authentication module.
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// UI preferences module.
    pub fn ui(&self) -> &UiStore {
        &self.ui
    }
}

/// Owns the adapters and the session's store modules.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use appstate::domain::Theme;
/// use appstate::domain::ports::TracingThemeApplier;
/// use appstate::outbound::storage::InMemoryStateStorage;
/// use appstate::store::StoreRegistry;
///
/// let registry = StoreRegistry::new(
///     Arc::new(InMemoryStateStorage::new()),
///     Arc::new(TracingThemeApplier),
///     "1.0.0",
/// );
/// let stores = registry.initialize().unwrap();
/// assert!(stores.app().is_initialized());
/// assert_eq!(stores.ui().toggle_theme(), Theme::Dark);
/// ```
pub struct StoreRegistry {
    storage: Arc<dyn StateStorage>,
    theme_applier: Arc<dyn ThemeApplier>,
    app_version: String,
    stores: Mutex<Option<Stores>>,
}

impl StoreRegistry {
    /// Create a registry; no module is built until [`Self::initialize`].
    pub fn new(
        storage: Arc<dyn StateStorage>,
        theme_applier: Arc<dyn ThemeApplier>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            theme_applier,
            app_version: app_version.into(),
            stores: Mutex::new(None),
        }
    }

    /// Build and initialize every module, or return the existing handle.
    ///
    /// Calling this again after success performs no work and runs no
    /// initializer twice. After a failure nothing is kept, so a later call
    /// starts from scratch.
    ///
    /// # Errors
    /// Returns the first module error: a storage read failure while
    /// rehydrating, or an initializer precondition that was not met.
    pub fn initialize(&self) -> Result<Stores, Error> {
        let mut slot = self.slot();
        if let Some(stores) = slot.as_ref() {
            debug!("store registry already initialized");
            return Ok(stores.clone());
        }
        let stores = self.compose().inspect_err(|err| {
            error!(code = %err.code(), message = err.message(), "store initialization failed");
        })?;
        info!(version = %self.app_version, "store registry initialized");
        *slot = Some(stores.clone());
        Ok(stores)
    }

    fn compose(&self) -> Result<Stores, Error> {
        let app = AppStore::hydrate(self.app_version.clone(), Arc::clone(&self.storage))?;
        app.initialize()?;

        let auth = AuthStore::hydrate(Arc::clone(&self.storage))?;
        auth.initialize(&app)?;

        let ui = UiStore::hydrate(Arc::clone(&self.storage), Arc::clone(&self.theme_applier))?;
        ui.initialize()?;

        Ok(Stores {
            app: Arc::new(app),
            auth: Arc::new(auth),
            ui: Arc::new(ui),
        })
    }

    /// Handle to the modules, if [`Self::initialize`] has succeeded.
    pub fn stores(&self) -> Option<Stores> {
        self.slot().clone()
    }

    /// Whether [`Self::initialize`] has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.slot().is_some()
    }

    /// End the session: dispose every module and forget the handle.
    ///
    /// Outstanding [`Stores`] clones keep working in memory but stop
    /// writing to storage. Persisted values are left in place for the next
    /// session.
    pub fn dispose(&self) {
        if let Some(stores) = self.slot().take() {
            stores.ui.dispose();
            stores.auth.dispose();
            stores.app.dispose();
            info!("store registry disposed");
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Stores>> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Application store module: bootstrap status and build version.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::StateStorage;

use super::slice::{ModulePhase, ModuleState, StoreSlice};

/// Observable application state. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// `true` once the app module initializer has run.
    pub is_initialized: bool,
    /// Build version reported by configuration.
    pub version: String,
}

impl ModuleState for AppState {
    const MODULE: &'static str = "app";
    const PERSISTED: &'static [&'static str] = &[];
}

/// Store module owning [`AppState`].
pub struct AppStore {
    slice: StoreSlice<AppState>,
}

impl AppStore {
    pub(crate) fn hydrate(
        version: impl Into<String>,
        storage: Arc<dyn StateStorage>,
    ) -> Result<Self, Error> {
        let initial = AppState {
            is_initialized: false,
            version: version.into(),
        };
        Ok(Self {
            slice: StoreSlice::hydrate(initial, storage)?,
        })
    }

    /// Mark the application bootstrapped and activate the module.
    pub(crate) fn initialize(&self) -> Result<(), Error> {
        self.set_initialized(true);
        self.slice.activate()?;
        info!(version = %self.version(), "app store initialized");
        Ok(())
    }

    /// Record whether bootstrap has completed.
    pub fn set_initialized(&self, value: bool) {
        self.slice
            .mutate("set_initialized", |state| state.is_initialized = value);
    }

    /// Whether bootstrap has completed.
    pub fn is_initialized(&self) -> bool {
        self.slice.read(|state| state.is_initialized)
    }

    /// Configured build version.
    pub fn version(&self) -> String {
        self.slice.read(|state| state.version.clone())
    }

    /// Clone of the module state.
    pub fn snapshot(&self) -> AppState {
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

//! Generic persisted state slice shared by every store module.
//!
//! A slice owns one module's state behind a lock, rehydrates the declared
//! persisted fields from [`StateStorage`] at construction, and writes those
//! fields through on every action that changes them. Fields outside the
//! declaration are volatile: they always start from the initial state.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::ports::StateStorage;

/// State shape of a store module.
///
/// Field names in [`ModuleState::PERSISTED`] are the serialised names (after
/// any serde renaming) and must exist in the serialised state.
pub trait ModuleState: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Module name used as the storage namespace.
    const MODULE: &'static str;
    /// Serialised field names written to durable storage.
    const PERSISTED: &'static [&'static str];
}

/// Lifecycle of a store module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulePhase {
    /// Constructed and rehydrated; its initializer has not completed.
    Uninitialized,
    /// Initializer completed; actions are live.
    Active,
    /// Session ended; actions no longer reach storage.
    Disposed,
}

/// Lock-protected state of one module plus its persistence policy.
pub struct StoreSlice<S> {
    state: RwLock<S>,
    phase: RwLock<ModulePhase>,
    storage: Arc<dyn StateStorage>,
}

impl<S: ModuleState> StoreSlice<S> {
    /// Build a slice from `initial`, overlaying any stored persisted fields.
    ///
    /// Stored values that no longer deserialise into the state shape are
    /// logged and skipped. Read failures abort construction.
    pub(crate) fn hydrate(initial: S, storage: Arc<dyn StateStorage>) -> Result<Self, Error> {
        let mut document = to_document(&initial)?;
        for &field in S::PERSISTED {
            if !document.contains_key(field) {
                return Err(Error::internal(format!(
                    "store module {} declares unknown persisted field {field}",
                    S::MODULE
                )));
            }
            let stored = storage.read(S::MODULE, field).map_err(|err| {
                Error::storage_unavailable(format!(
                    "failed to rehydrate {}.{field}: {err}",
                    S::MODULE
                ))
            })?;
            let Some(value) = stored else {
                continue;
            };
            let mut candidate = document.clone();
            candidate.insert(field.to_owned(), value);
            match serde_json::from_value::<S>(Value::Object(candidate.clone())) {
                Ok(_) => {
                    debug!(module = S::MODULE, field, "persisted field rehydrated");
                    document = candidate;
                }
                Err(err) => warn!(
                    module = S::MODULE,
                    field,
                    error = %err,
                    "ignoring unreadable persisted value"
                ),
            }
        }
        let state = serde_json::from_value(Value::Object(document)).map_err(|err| {
            Error::internal(format!("failed to rebuild {} state: {err}", S::MODULE))
        })?;
        Ok(Self {
            state: RwLock::new(state),
            phase: RwLock::new(ModulePhase::Uninitialized),
            storage,
        })
    }

    /// Borrow the current state for the duration of `f`.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> S {
        self.read(S::clone)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ModulePhase {
        *self.phase.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply an action atomically and write through changed persisted fields.
    ///
    /// The write lock is held across the closure and the storage writes, so
    /// concurrent actions on the same module never interleave and writes
    /// reach storage in mutation order.
    pub(crate) fn mutate<R>(&self, action: &'static str, apply: impl FnOnce(&mut S) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let before = persisted_values(&*state);
        let result = apply(&mut state);

        if self.phase() == ModulePhase::Disposed {
            warn!(
                module = S::MODULE,
                action, "action ran on a disposed store module; changes are not persisted"
            );
            return result;
        }

        for (field, value) in persisted_values(&*state) {
            if before.get(field) != Some(&value) {
                self.write_through(action, field, &value);
            }
        }
        result
    }

    fn write_through(&self, action: &'static str, field: &'static str, value: &Value) {
        let written = if value.is_null() {
            self.storage.remove(S::MODULE, field)
        } else {
            self.storage.write(S::MODULE, field, value)
        };
        match written {
            Ok(()) => debug!(module = S::MODULE, field, action, "persisted field written"),
            Err(err) => warn!(
                module = S::MODULE,
                field,
                action,
                error = %err,
                "persisted field write failed"
            ),
        }
    }

    /// Move from `Uninitialized` to `Active`.
    pub(crate) fn activate(&self) -> Result<(), Error> {
        let mut phase = self.phase.write().unwrap_or_else(PoisonError::into_inner);
        match *phase {
            ModulePhase::Uninitialized | ModulePhase::Active => {
                *phase = ModulePhase::Active;
                Ok(())
            }
            ModulePhase::Disposed => Err(Error::initialization(format!(
                "store module {} was disposed and cannot be reactivated",
                S::MODULE
            ))),
        }
    }

    /// Mark the module as torn down.
    pub(crate) fn dispose(&self) {
        *self.phase.write().unwrap_or_else(PoisonError::into_inner) = ModulePhase::Disposed;
    }
}

fn to_document<S: ModuleState>(state: &S) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(state) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(Error::internal(format!(
            "store module {} state must serialise to an object",
            S::MODULE
        ))),
        Err(err) => Err(Error::internal(format!(
            "failed to serialise {} state: {err}",
            S::MODULE
        ))),
    }
}

fn persisted_values<S: ModuleState>(state: &S) -> BTreeMap<&'static str, Value> {
    let mut document = match to_document(state) {
        Ok(document) => document,
        Err(err) => {
            warn!(module = S::MODULE, error = %err, "skipping write-through");
            return BTreeMap::new();
        }
    };
    S::PERSISTED
        .iter()
        .filter_map(|&field| document.remove(field).map(|value| (field, value)))
        .collect()
}

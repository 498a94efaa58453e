//! Process-local state storage.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::domain::ports::{StateStorage, StateStorageError, validate_key};

type Entries = BTreeMap<(String, String), Value>;

/// In-memory [`StateStorage`] adapter.
///
/// Clones share the same entries, so a clone handed to a fresh registry
/// behaves like durable storage surviving a page reload.
///
/// # Examples
/// ```
/// use appstate::domain::ports::StateStorage;
/// use appstate::outbound::storage::InMemoryStateStorage;
/// use serde_json::json;
///
/// let storage = InMemoryStateStorage::new();
/// let reloaded = storage.clone();
/// storage.write("ui", "theme", &json!("dark")).unwrap();
/// assert_eq!(reloaded.read("ui", "theme").unwrap(), Some(json!("dark")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStorage {
    entries: Arc<Mutex<Entries>>,
}

impl InMemoryStateStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values across all modules.
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |entries| entries.len())
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field names stored for `module`, in lexical order.
    pub fn fields(&self, module: &str) -> Vec<String> {
        self.lock().map_or_else(
            |_| Vec::new(),
            |entries| {
                entries
                    .keys()
                    .filter(|(stored_module, _)| stored_module == module)
                    .map(|(_, field)| field.clone())
                    .collect()
            },
        )
    }

    fn lock(&self) -> Result<MutexGuard<'_, Entries>, StateStorageError> {
        self.entries
            .lock()
            .map_err(|_| StateStorageError::unavailable("in-memory state storage lock poisoned"))
    }
}

fn key(module: &str, field: &str) -> Result<(String, String), StateStorageError> {
    validate_key(module)?;
    validate_key(field)?;
    Ok((module.to_owned(), field.to_owned()))
}

impl StateStorage for InMemoryStateStorage {
    fn read(&self, module: &str, field: &str) -> Result<Option<Value>, StateStorageError> {
        let key = key(module, field)?;
        Ok(self.lock()?.get(&key).cloned())
    }

    fn write(&self, module: &str, field: &str, value: &Value) -> Result<(), StateStorageError> {
        let key = key(module, field)?;
        self.lock()?.insert(key, value.clone());
        Ok(())
    }

    fn remove(&self, module: &str, field: &str) -> Result<(), StateStorageError> {
        let key = key(module, field)?;
        self.lock()?.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn storage() -> InMemoryStateStorage {
        InMemoryStateStorage::new()
    }

    #[rstest]
    fn missing_values_read_as_none(storage: InMemoryStateStorage) {
        assert_eq!(storage.read("auth", "token").expect("read"), None);
        assert!(storage.is_empty());
    }

    #[rstest]
    fn last_write_wins(storage: InMemoryStateStorage) {
        storage.write("ui", "theme", &json!("dark")).expect("write");
        storage.write("ui", "theme", &json!("light")).expect("write");

        assert_eq!(storage.read("ui", "theme").expect("read"), Some(json!("light")));
        assert_eq!(storage.len(), 1);
    }

    #[rstest]
    fn modules_are_isolated(storage: InMemoryStateStorage) {
        storage.write("ui", "theme", &json!("dark")).expect("write");

        assert_eq!(storage.read("auth", "theme").expect("read"), None);
        assert_eq!(storage.fields("ui"), vec!["theme".to_owned()]);
    }

    #[rstest]
    fn remove_forgets_values_and_tolerates_missing_keys(storage: InMemoryStateStorage) {
        storage.write("auth", "token", &json!("abc")).expect("write");
        storage.remove("auth", "token").expect("remove");
        storage.remove("auth", "token").expect("second remove");

        assert_eq!(storage.read("auth", "token").expect("read"), None);
    }

    #[rstest]
    fn invalid_keys_are_rejected(storage: InMemoryStateStorage) {
        let err = storage
            .write("../ui", "theme", &json!("dark"))
            .expect_err("traversal key must fail");
        assert_eq!(err, StateStorageError::invalid_key("../ui"));
    }
}

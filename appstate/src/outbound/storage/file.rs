//! File-backed state storage built on `cap_std`.
//!
//! Each module is stored as one JSON object document named `<module>.json`
//! inside a capability-scoped directory. Writes land in a hidden temporary
//! file that is then renamed over the document, so readers and later
//! startups never observe a partially written file. A mutex per storage
//! handle serialises reads against read-modify-write cycles.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use cap_std::fs::{Dir, OpenOptions};
use cap_std::ambient_authority;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::ports::{StateStorage, StateStorageError, validate_key};

/// [`StateStorage`] adapter persisting module documents to a directory.
#[derive(Debug)]
pub struct FileStateStorage {
    root: PathBuf,
    dir: Dir,
    lock: Mutex<()>,
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl FileStateStorage {
    /// Open (creating if needed) the storage directory at `path`.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use appstate::outbound::storage::FileStateStorage;
    ///
    /// let storage = FileStateStorage::open("/var/lib/appstate")?;
    /// assert!(storage.root().ends_with("appstate"));
    /// # Ok::<(), appstate::domain::ports::StateStorageError>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StateStorageError> {
        let root = path.as_ref().to_path_buf();
        Dir::create_ambient_dir_all(&root, ambient_authority())
            .map_err(|err| io_error("create", &root, &err))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .map_err(|err| io_error("open", &root, &err))?;
        debug!(path = %root.display(), "file state storage opened");
        Ok(Self {
            root,
            dir,
            lock: Mutex::new(()),
        })
    }

    /// Directory holding the module documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_name(module: &str) -> Result<String, StateStorageError> {
        validate_key(module)?;
        Ok(format!("{module}.json"))
    }

    fn load(&self, module: &str) -> Result<Map<String, Value>, StateStorageError> {
        let name = Self::document_name(module)?;
        let contents = match self.dir.read_to_string(&name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(io_error("read", &self.root.join(&name), &err)),
        };
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(other) => Err(StateStorageError::serialization(format!(
                "{name} must hold a JSON object, found {}",
                json_kind(&other)
            ))),
            Err(err) => Err(StateStorageError::serialization(format!("{name}: {err}"))),
        }
    }

    fn store(&self, module: &str, document: Map<String, Value>) -> Result<(), StateStorageError> {
        let name = Self::document_name(module)?;
        let body = serde_json::to_vec_pretty(&Value::Object(document))
            .map_err(|err| StateStorageError::serialization(format!("{name}: {err}")))?;
        let tmp_name = format!(
            ".{name}.tmp.{}.{}",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        );

        if let Err(err) = self.write_temp(&tmp_name, &body) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(io_error("write", &self.root.join(&tmp_name), &err));
        }
        if let Err(err) = self.dir.rename(&tmp_name, &self.dir, &name) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(io_error("replace", &self.root.join(&name), &err));
        }
        Ok(())
    }

    fn write_temp(&self, tmp_name: &str, body: &[u8]) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        file.write_all(body)?;
        file.sync_all()
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StateStorageError> {
        self.lock
            .lock()
            .map_err(|_| StateStorageError::unavailable("file state storage lock poisoned"))
    }

    fn update(
        &self,
        module: &str,
        edit: impl FnOnce(&mut Map<String, Value>),
    ) -> Result<(), StateStorageError> {
        let _guard = self.guard()?;
        let mut document = self.load(module)?;
        edit(&mut document);
        self.store(module, document)
    }
}

fn io_error(action: &str, path: &Path, err: &io::Error) -> StateStorageError {
    StateStorageError::unavailable(format!("failed to {action} {}: {err}", path.display()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl StateStorage for FileStateStorage {
    fn read(&self, module: &str, field: &str) -> Result<Option<Value>, StateStorageError> {
        validate_key(field)?;
        let _guard = self.guard()?;
        let mut document = self.load(module)?;
        Ok(document.remove(field))
    }

    fn write(&self, module: &str, field: &str, value: &Value) -> Result<(), StateStorageError> {
        validate_key(field)?;
        self.update(module, |document| {
            document.insert(field.to_owned(), value.clone());
        })
    }

    fn remove(&self, module: &str, field: &str) -> Result<(), StateStorageError> {
        validate_key(field)?;
        self.update(module, |document| {
            document.remove(field);
        })
    }
}

#[cfg(test)]
mod tests {
    //! Round-trip coverage against a temporary directory.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[rstest]
    fn values_survive_reopening(temp_dir: TempDir) {
        let storage = FileStateStorage::open(temp_dir.path()).expect("open");
        storage.write("ui", "theme", &json!("dark")).expect("write");
        storage
            .write("ui", "sidebarCollapsed", &json!(true))
            .expect("write");
        drop(storage);

        let reopened = FileStateStorage::open(temp_dir.path()).expect("reopen");
        assert_eq!(reopened.read("ui", "theme").expect("read"), Some(json!("dark")));
        assert_eq!(
            reopened.read("ui", "sidebarCollapsed").expect("read"),
            Some(json!(true))
        );
    }

    #[rstest]
    fn one_document_per_module(temp_dir: TempDir) {
        let storage = FileStateStorage::open(temp_dir.path()).expect("open");
        storage.write("auth", "token", &json!("abc")).expect("write");
        storage.write("ui", "theme", &json!("light")).expect("write");

        assert!(temp_dir.path().join("auth.json").exists());
        assert!(temp_dir.path().join("ui.json").exists());
        assert_eq!(storage.read("auth", "theme").expect("read"), None);
    }

    #[rstest]
    fn remove_drops_the_field(temp_dir: TempDir) {
        let storage = FileStateStorage::open(temp_dir.path()).expect("open");
        storage.write("auth", "token", &json!("abc")).expect("write");
        storage.remove("auth", "token").expect("remove");

        assert_eq!(storage.read("auth", "token").expect("read"), None);
    }

    #[rstest]
    fn nested_directories_are_created(temp_dir: TempDir) {
        let nested = temp_dir.path().join("a").join("b");
        let storage = FileStateStorage::open(&nested).expect("open nested");

        assert_eq!(storage.root(), nested.as_path());
    }

    #[rstest]
    fn writes_leave_no_temporary_files(temp_dir: TempDir) {
        let storage = FileStateStorage::open(temp_dir.path()).expect("open");
        storage.write("ui", "theme", &json!("dark")).expect("write");
        storage.write("ui", "theme", &json!("light")).expect("rewrite");
        storage.remove("ui", "theme").expect("remove");

        let mut names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .expect("list dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["ui.json".to_owned()]);
    }

    #[rstest]
    fn concurrent_readers_never_see_partial_documents(temp_dir: TempDir) {
        let storage = Arc::new(FileStateStorage::open(temp_dir.path()).expect("open"));
        let large = json!("x".repeat(256 * 1024));
        storage.write("ui", "theme", &large).expect("seed");

        let writer = {
            let storage = Arc::clone(&storage);
            let large = large.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    storage.write("ui", "theme", &large).expect("rewrite");
                }
            })
        };
        while !writer.is_finished() {
            let value = storage.read("ui", "theme").expect("read never fails mid-write");
            assert_eq!(value.as_ref(), Some(&large));
        }
        writer.join().expect("writer thread");

        let reopened = FileStateStorage::open(temp_dir.path()).expect("reopen");
        assert_eq!(reopened.read("ui", "theme").expect("read"), Some(large));
    }

    #[rstest]
    fn corrupt_documents_surface_serialization_errors(temp_dir: TempDir) {
        std::fs::write(temp_dir.path().join("ui.json"), b"[1, 2]").expect("seed corrupt file");
        let storage = FileStateStorage::open(temp_dir.path()).expect("open");

        let err = storage.read("ui", "theme").expect_err("array document is invalid");
        assert!(matches!(err, StateStorageError::Serialization { .. }));
    }
}

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use thiserror::Error;
use tracing::{error, warn};

pub const LEDGER_KEY: &str = "attendanceData";
const DAY_KEY_PREFIX: &str = "attendance_";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value port the tracker persists through.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes every entry or none of them.
    fn set_all(&self, entries: Vec<(String, String)>) -> Result<(), StoreError>;

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.set_all(vec![(key.to_string(), value)])
    }
}

pub fn day_key(date: NaiveDate) -> String {
    format!("{DAY_KEY_PREFIX}{}", date.format("%Y-%m-%d"))
}

/// Reads and decodes `key`, falling back to the default when the key is
/// missing or its content does not parse.
pub fn load_or_default<T, S>(store: &S, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(key, "ignoring malformed stored value: {err}");
            Ok(T::default())
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set_all(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        lock(&self.entries)?.extend(entries);
        Ok(())
    }
}

/// All keys live in one JSON object file. Writes go to a sibling temporary
/// file that is renamed over the original, so a batch lands whole or not at all.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let entries = load_entries(&path);
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set_all(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        let mut current = lock(&self.entries)?;
        let mut next = current.clone();
        next.extend(entries);

        let payload = serde_json::to_vec_pretty(&next)?;
        let staging = self.path.with_extension("json.tmp");
        if let Err(err) = fs::write(&staging, payload).and_then(|()| fs::rename(&staging, &self.path)) {
            error!(path = %self.path.display(), "failed to replace data file: {err}");
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }

        *current = next;
        Ok(())
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex.lock().map_err(|_| StoreError::Poisoned)
}

//! Flat key-value persistence.
//!
//! Every durable value the app owns lives under one of the keys below, as a
//! JSON-encoded string. Writes are write-through: `set` has fully reached
//! the backing file before it returns, so a read that follows a mutation in
//! the same logical action always observes it.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Serialize};

pub const KEY_LOGGED_IN: &str = "isLoggedIn";
pub const KEY_MOOD_ENTRIES: &str = "moodEntries";
pub const KEY_HOPES: &str = "userHopes";
pub const KEY_DIARY: &str = "userDiary";
pub const KEY_PROFILE: &str = "userProfile";
pub const KEY_ACCOUNTS: &str = "appUsers";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Cheaply cloneable handle to the shared key-value store. Each component
/// treats its own key namespace as exclusively owned; only the session
/// manager clears across namespaces.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    values: HashMap<String, String>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (or create) a file-backed store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                values,
                path: Some(path),
            })),
        })
    }

    /// Volatile store for tests and embedding shells without a disk.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                values: HashMap::new(),
                path: None,
            })),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let inner = self.lock();
        match inner.values.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.put_raw(key, raw)
    }

    /// `"true"` / absent — the logged-in flag is the one non-JSON value.
    pub fn set_flag(&self, key: &str) -> StoreResult<()> {
        self.put_raw(key, "true".to_owned())
    }

    pub fn get_flag(&self, key: &str) -> bool {
        self.lock().values.get(key).map(String::as_str) == Some("true")
    }

    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let mut inner = self.lock();
        let prev = inner.values.remove(key);
        if let Err(e) = flush(&inner) {
            if let Some(prev) = prev {
                inner.values.insert(key.to_owned(), prev);
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.clear_except(&[])
    }

    /// Drop every key not named in `keep`. The session manager uses this to
    /// wipe session-scoped data while the account directory survives.
    pub fn clear_except(&self, keep: &[&str]) -> StoreResult<()> {
        let mut inner = self.lock();
        let prev = std::mem::take(&mut inner.values);
        inner.values = prev
            .iter()
            .filter(|(k, _)| keep.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Err(e) = flush(&inner) {
            inner.values = prev;
            return Err(e);
        }
        Ok(())
    }

    fn put_raw(&self, key: &str, raw: String) -> StoreResult<()> {
        let mut inner = self.lock();
        let prev = inner.values.insert(key.to_owned(), raw);
        if let Err(e) = flush(&inner) {
            match prev {
                Some(prev) => inner.values.insert(key.to_owned(), prev),
                None => inner.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("store lock poisoned")
    }
}

/// Serialize the whole map and swap it into place via a temp file, so a
/// crash mid-write never leaves a torn store on disk.
fn flush(inner: &Inner) -> StoreResult<()> {
    let Some(path) = &inner.path else {
        return Ok(());
    };
    let raw = serde_json::to_string_pretty(&inner.values)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, raw)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

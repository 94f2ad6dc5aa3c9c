//! Best-effort key/value persistence.
//!
//! [`Storage`] is the only thing the ledger talks to. It serializes values to
//! JSON and hands the text to a [`StorageBackend`]. Failures never reach the
//! caller: reads fall back to `None`, writes report `false`, and both are
//! logged. The in-memory state of the caller stays authoritative.

use std::sync::Arc;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

use crate::{log_error, log_warn};

mod json_file;
mod memory;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;

const ENABLE_LOGS: bool = true;

pub const CLIENTS_KEY: &str = "clients";
pub const SESSIONS_KEY: &str = "sessions";
pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Raw string storage. Implementations may fail; [`Storage`] absorbs it.
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
}

impl Storage {
    pub fn new<B>(backend: B) -> Self
    where
        B: StorageBackend + 'static,
    {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    /// Returns `None` when the key is missing, unreadable, or holds malformed
    /// JSON for `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log_error!("Failed to read '{key}' from storage: {err:#}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log_warn!("Ignoring malformed value stored under '{key}': {err}");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(err) => {
                log_error!("Failed to serialize '{key}': {err}");
                return false;
            }
        };

        match self.backend.write(key, &serialized) {
            Ok(()) => true,
            Err(err) => {
                log_error!("Failed to persist '{key}': {err:#}");
                false
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(err) => {
                log_error!("Failed to remove '{key}' from storage: {err:#}");
                false
            }
        }
    }
}

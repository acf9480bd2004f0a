//! # Session
//!
//! The session is a single bearer token kept in durable storage. It is the
//! only record of whether somebody is logged in: the auth gateway writes it,
//! the route guard and the API client read it, logout removes it.

pub mod claims;
#[cfg(not(target_arch = "wasm32"))]
pub mod file;

pub use claims::{decode_claims, decode_subject, is_owner};
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;

/// Key the token is stored under in every backend.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Failure reported by a [`TokenStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage is corrupt: {message}")]
    Corrupt { message: String },

    #[error("session storage unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Durable key/value storage for session data.
pub trait TokenStorage: fmt::Debug + Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::unavailable("memory storage lock poisoned"))
    }
}

impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Handle on the current session token.
///
/// Clones share the same backend, so a token written through one handle is
/// visible through all of them.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// A store over fresh [`MemoryStorage`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// The current token, or `None` when logged out.
    ///
    /// Storage failures are logged and read as "no session"; an empty string
    /// is treated the same way.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        match self.storage.read(TOKEN_STORAGE_KEY) {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                warn!(error = %err, "failed to read session token");
                None
            }
        }
    }

    /// Persists `token` as the current session.
    ///
    /// # Errors
    /// Returns an error if the storage backend rejects the write.
    pub fn set(&self, token: &str) -> Result<(), StorageError> {
        self.storage.write(TOKEN_STORAGE_KEY, token)
    }

    /// Ends the session.
    ///
    /// # Errors
    /// Returns an error if the storage backend rejects the removal.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_STORAGE_KEY)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("storage", &self.storage)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }
}

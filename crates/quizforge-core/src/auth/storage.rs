//! Pluggable persistence backends for the credential token.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AUTH;

/// The persisted credential record: the raw token plus the expiry derived
/// from its own `exp` claim at the time it was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredential {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Where the credential record lives between runs.
///
/// Backends are infallible at the trait boundary: storage problems are
/// logged and surface as an absent credential, never as a panic or an error
/// the caller has to handle.
pub trait StorageBackend: fmt::Debug + Send + Sync {
    /// Reads the stored record, if any.
    fn read(&self) -> Option<StoredCredential>;

    /// Replaces the stored record.
    fn write(&self, credential: &StoredCredential);

    /// Removes the stored record unconditionally.
    fn remove(&self);
}

/// Process-local storage; nothing survives a restart. Used in tests and as
/// a safe default when no credential path is configured.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<StoredCredential>>,
}

impl MemoryStorage {
    /// The record is a plain value, so a poisoned lock leaves it intact.
    fn slot(&self) -> MutexGuard<'_, Option<StoredCredential>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self) -> Option<StoredCredential> {
        self.slot().clone()
    }

    fn write(&self, credential: &StoredCredential) {
        *self.slot() = Some(credential.clone());
    }

    fn remove(&self) {
        *self.slot() = None;
    }
}

/// JSON file storage; the credential survives restarts of the client.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a file backend at the given path. The file and its parent
    /// directories are created lazily on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the credential file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StorageBackend for FileStorage {
    fn read(&self) -> Option<StoredCredential> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_AUTH,
                    path = %self.path.display(),
                    error = %err,
                    "Failed to read credential file"
                );
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(credential) => Some(credential),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_AUTH,
                    path = %self.path.display(),
                    error = %err,
                    "Credential file is corrupt, ignoring it"
                );
                None
            }
        }
    }

    fn write(&self, credential: &StoredCredential) {
        if let Some(parent) = self.path.parent()
            && let Err(err) = std::fs::create_dir_all(parent)
        {
            tracing::warn!(
                target: TRACING_TARGET_AUTH,
                path = %parent.display(),
                error = %err,
                "Failed to create credential directory"
            );
            return;
        }

        let bytes = match serde_json::to_vec_pretty(credential) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_AUTH,
                    error = %err,
                    "Failed to serialize credential"
                );
                return;
            }
        };

        if let Err(err) = std::fs::write(&self.path, bytes) {
            tracing::warn!(
                target: TRACING_TARGET_AUTH,
                path = %self.path.display(),
                error = %err,
                "Failed to write credential file"
            );
        }
    }

    fn remove(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_AUTH,
                    path = %self.path.display(),
                    error = %err,
                    "Failed to remove credential file"
                );
            }
        }
    }
}

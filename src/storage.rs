//! Session persistence.
//!
//! DESIGN
//! ======
//! The session survives restarts through one JSON document holding the three
//! logical keys: `user`, `isAuthenticated`, `rememberMe`. Writing a single
//! document via temp-file-plus-rename keeps the authenticated flag and the
//! user record in step; a partial write can never leave one without the
//! other.
//!
//! ERROR HANDLING
//! ==============
//! A missing file is the anonymous session, not an error. A corrupt file
//! surfaces as [`StoreError::Corrupt`]; the session manager logs it and
//! starts anonymous rather than crashing.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::User;

const SESSION_FILE: &str = "session.json";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document exists but does not decode.
    #[error("session store corrupt: {0}")]
    Corrupt(String),

    #[error("session encode failed: {0}")]
    Encode(String),
}

// =============================================================================
// PERSISTED DOCUMENT
// =============================================================================

/// The durable form of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub remember_me: bool,
}

impl PersistedSession {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(user: User, remember_me: bool) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            remember_me,
        }
    }
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Synchronous durable store for the session document.
pub trait SessionStore: Send + Sync {
    /// Reads the stored session; absence loads as the anonymous session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] when the document exists but does not
    /// decode, or [`StoreError::Io`] for underlying read failures.
    fn load(&self) -> Result<PersistedSession, StoreError>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Encode`] when the document
    /// cannot be written.
    fn save(&self, session: &PersistedSession) -> Result<(), StoreError>;

    /// Removes the stored session. Removing an absent session succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for underlying removal failures.
    fn clear(&self) -> Result<(), StoreError>;
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Durable store backed by `session.json` under the data directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<PersistedSession, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PersistedSession::anonymous());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        // Rename is atomic on the same filesystem; readers see the old
        // document or the new one, never a torn write.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Volatile store for tests and `--no-persist` runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<PersistedSession>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PersistedSession> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<PersistedSession, StoreError> {
        Ok(self.lock().clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StoreError> {
        *self.lock() = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock() = PersistedSession::anonymous();
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

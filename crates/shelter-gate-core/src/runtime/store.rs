// crates/shelter-gate-core/src/runtime/store.rs
// ============================================================================
// Module: Shelter Gate Session Stores
// Description: In-memory and file-backed permission snapshot stores.
// Purpose: Hold the current session for the lifetime of the UI process.
// Dependencies: crate::core, crate::interfaces, serde_json
// ============================================================================

//! ## Overview
//! [`InMemorySessionStore`] is the default store: the session lives exactly
//! as long as the process. [`FileSessionStore`] optionally persists it so a
//! restart does not force a new login. Both keep the credential and the
//! permission snapshot in a single record, so clearing one always clears the
//! other.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;

use crate::core::ActorSession;
use crate::core::AuthenticatedSession;
use crate::core::SessionToken;
use crate::interfaces::SessionStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of a persisted session file in bytes.
pub const MAX_SESSION_FILE_BYTES: usize = 256 * 1024;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Process-scoped session store.
///
/// Cloning yields another handle onto the same snapshot.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    /// Current session, replaced wholesale on every write.
    slot: Arc<RwLock<Option<Arc<AuthenticatedSession>>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored record without cloning its contents.
    fn snapshot(&self) -> Result<Option<Arc<AuthenticatedSession>>, StoreError> {
        let guard = self
            .slot
            .read()
            .map_err(|_| StoreError::Store("session store lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    /// Replaces the stored record and returns the previous one.
    fn replace(
        &self,
        value: Option<Arc<AuthenticatedSession>>,
    ) -> Result<Option<Arc<AuthenticatedSession>>, StoreError> {
        let mut guard = self
            .slot
            .write()
            .map_err(|_| StoreError::Store("session store lock poisoned".to_string()))?;
        Ok(std::mem::replace(&mut *guard, value))
    }
}

impl SessionStore for InMemorySessionStore {
    fn initialize(&self, session: AuthenticatedSession) -> Result<(), StoreError> {
        self.replace(Some(Arc::new(session)))?;
        Ok(())
    }

    fn current(&self) -> Result<Option<ActorSession>, StoreError> {
        Ok(self.snapshot()?.map(|record| record.actor.clone()))
    }

    fn credential(&self) -> Result<Option<SessionToken>, StoreError> {
        Ok(self.snapshot()?.and_then(|record| record.token.clone()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.replace(None)?;
        Ok(())
    }

    fn take(&self) -> Result<Option<AuthenticatedSession>, StoreError> {
        Ok(self.replace(None)?.map(Arc::unwrap_or_clone))
    }
}

// ============================================================================
// SECTION: File Store
// ============================================================================

/// Session store persisted as a single JSON document.
///
/// Writes go through a sibling temp file and an atomic rename; clearing
/// removes the one file. Every read goes back to disk, so a logout from
/// another handle is observed immediately.
#[derive(Debug)]
pub struct FileSessionStore {
    /// Path of the session document.
    path: PathBuf,
    /// Serializes writers within this process.
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Creates a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the session document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the session document, if present.
    fn load(&self) -> Result<Option<AuthenticatedSession>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err.to_string())),
        };
        if bytes.len() > MAX_SESSION_FILE_BYTES {
            return Err(StoreError::Corrupt("session file exceeds size limit".to_string()));
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    /// Removes the session document; a missing file is not an error.
    fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err.to_string())),
        }
    }

    /// Acquires the in-process writer lock.
    fn lock_writer(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Store("session store lock poisoned".to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn initialize(&self, session: AuthenticatedSession) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(&session).map_err(|err| StoreError::Store(err.to_string()))?;
        let _guard = self.lock_writer()?;
        write_atomic(&self.path, &bytes)
    }

    fn current(&self) -> Result<Option<ActorSession>, StoreError> {
        Ok(self.load()?.map(|record| record.actor))
    }

    fn credential(&self) -> Result<Option<SessionToken>, StoreError> {
        Ok(self.load()?.and_then(|record| record.token))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock_writer()?;
        self.remove()
    }

    fn take(&self) -> Result<Option<AuthenticatedSession>, StoreError> {
        let _guard = self.lock_writer()?;
        // A corrupt document is still removed so no stale credential survives.
        let loaded = self.load();
        self.remove()?;
        match loaded {
            Ok(record) => Ok(record),
            Err(StoreError::Corrupt(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes `bytes` to `path` through a temp file and rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StoreError::Io(err.to_string()))?;
    }
    let temp_path = path.with_extension("tmp");
    let mut options = fs::OpenOptions::new();
    options.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&temp_path).map_err(|err| StoreError::Io(err.to_string()))?;
    file.write_all(bytes).map_err(|err| StoreError::Io(err.to_string()))?;
    file.sync_all().map_err(|err| StoreError::Io(err.to_string()))?;
    drop(file);
    fs::rename(&temp_path, path).map_err(|err| StoreError::Io(err.to_string()))
}

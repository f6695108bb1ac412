//! The persisted "current session" record.

use crate::backend::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use crate::error::{IdentityError, IdentityResult};
use flexiride_types::Session;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key of the session record.
pub const USER_KEY: &str = "user";

/// Durable home of the serialized session.
///
/// A store built without a backend models a context with no persistence:
/// reads return `None` and writes are skipped.
#[derive(Clone)]
pub struct IdentityStore {
    backend: Option<Arc<dyn KeyValueStore>>,
}

impl IdentityStore {
    /// Creates a store over the given backend.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Creates a store with no backend.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Creates a store backed by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// Creates a file-backed store rooted at `dir`.
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileKeyValueStore::new(dir)))
    }

    /// Resolves the platform data directory (`<data_dir>/flexiride`).
    ///
    /// Falls back to [`IdentityStore::unavailable`] when the platform has no
    /// data directory, e.g. a service account without a home.
    #[must_use]
    pub fn detect() -> Self {
        match Self::default_dir() {
            Some(dir) => {
                debug!("Identity store at {:?}", dir);
                Self::at_dir(dir)
            }
            None => {
                warn!("No data directory available, session will not persist");
                Self::unavailable()
            }
        }
    }

    /// The directory [`IdentityStore::detect`] would use.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("flexiride"))
    }

    /// Returns true if a backend is attached.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Persists `session`, replacing any previous record.
    pub fn put(&self, session: &Session) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(e) = Self::write(backend.as_ref(), session) {
            warn!("Failed to persist session to {} store: {}", backend.name(), e);
        }
    }

    /// Returns the persisted session, if there is a readable one.
    #[must_use]
    pub fn get(&self) -> Option<Session> {
        let backend = self.backend.as_ref()?;
        match Self::read(backend.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring persisted session: {}", e);
                None
            }
        }
    }

    /// Removes the persisted session. Clearing an empty store is a no-op.
    pub fn clear(&self) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(e) = backend.remove_item(USER_KEY) {
            warn!("Failed to clear session from {} store: {}", backend.name(), e);
        }
    }

    fn write(backend: &dyn KeyValueStore, session: &Session) -> IdentityResult<()> {
        backend.set_item(USER_KEY, &session.to_json()?)
    }

    fn read(backend: &dyn KeyValueStore) -> IdentityResult<Option<Session>> {
        let Some(raw) = backend.get_item(USER_KEY)? else {
            return Ok(None);
        };
        Session::from_json(&raw)
            .map(Some)
            .map_err(|e| IdentityError::Malformed(e.to_string()))
    }
}

impl fmt::Debug for IdentityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityStore")
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .finish()
    }
}

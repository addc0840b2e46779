//! Session token storage
//!
//! The bearer token is the only state the client keeps between calls. It is
//! held behind a [`TokenStore`] and wrapped in a [`Session`] handle that is
//! handed to [`FoodorderClient`](crate::FoodorderClient) at construction.
//! Operations read the token at dispatch time, so a login in one task is
//! visible to requests dispatched afterwards by any other task.

use crate::error::ApiResult;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Backend for the persisted bearer token
pub trait TokenStore: Send + Sync {
    /// Read the current token, if any
    fn load(&self) -> ApiResult<Option<String>>;

    /// Replace the current token
    fn store(&self, token: &str) -> ApiResult<()>;

    /// Remove the current token
    fn clear(&self) -> ApiResult<()>;
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ApiResult<Option<String>> {
        let guard = self
            .token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn store(&self, token: &str) -> ApiResult<()> {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}

/// Write-through file-backed token store
///
/// Every read goes to disk, so several processes sharing the same file see
/// each other's logins (last writer wins).
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ApiResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, token: &str) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        debug!(path = %self.path.display(), "Session token persisted");
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared handle to the session token
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Wrap an arbitrary token store
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Session kept in memory only
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Session persisted to `path`
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        Self::new(FileTokenStore::new(path))
    }

    /// Current token, if one is stored
    pub fn token(&self) -> ApiResult<Option<String>> {
        self.store.load()
    }

    /// Replace the stored token
    pub fn set_token(&self, token: &str) -> ApiResult<()> {
        self.store.store(token)
    }

    /// Forget the stored token
    pub fn clear_token(&self) -> ApiResult<()> {
        self.store.clear()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

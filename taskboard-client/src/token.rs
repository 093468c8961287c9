/// Durable bearer-token storage
///
/// The session survives an application restart because the bearer token is
/// persisted outside process memory. The [`TokenStore`] trait is the seam:
/// the session store talks to the trait, and the application picks where the
/// token actually lives.
///
/// Two implementations ship with the crate:
///
/// - [`FileTokenStore`]: one small file under the user's configuration
///   directory (the default for desktop/CLI use)
/// - [`MemoryTokenStore`]: process-local, for tests and embedders that
///   manage persistence themselves

use crate::error::ClientResult;
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

/// Durable storage for the session's bearer token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the persisted token, if one exists
    async fn load(&self) -> ClientResult<Option<String>>;

    /// Persists the token, replacing any previous one
    async fn save(&self, token: &str) -> ClientResult<()>;

    /// Removes the persisted token; succeeds if none exists
    async fn clear(&self) -> ClientResult<()>;
}

/// Token storage backed by a single file
///
/// The file holds nothing but the token itself. Parent directories are
/// created on first save.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store writing to the given path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default token location under the platform configuration directory
    ///
    /// Returns `None` on platforms without a configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskboard").join("token"))
    }

    /// Path this store reads and writes
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> ClientResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await?;
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local token storage
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> ClientResult<Option<String>> {
        Ok(self.token.read().expect("token lock poisoned").clone())
    }

    async fn save(&self, token: &str) -> ClientResult<()> {
        *self.token.write().expect("token lock poisoned") = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.token.write().expect("token lock poisoned") = None;
        Ok(())
    }
}

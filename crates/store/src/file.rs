//! JSON-file token cache, one file per environment.
//!
//! Record shape: `{"access_token": "...", "expires_at": 1700000000}`.
//! A missing, unreadable or corrupt file is treated as a cache miss.

use async_trait::async_trait;
use etims_types::{CachedToken, Environment, EtimsError, TokenCache, traits::Result};
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

/// A [`TokenCache`] that persists each environment's token as a JSON file.
///
/// Writes go to a uniquely named sibling temp file that is then renamed over
/// the record, so concurrent readers see either the old or the new token and
/// concurrent writers never share a temp file. On Unix the record is readable
/// by its owner only.
#[derive(Debug, Clone)]
pub struct FileTokenCache {
    dir: PathBuf,
}

impl FileTokenCache {
    /// Caches tokens under `dir`, creating it on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Caches tokens in the OS temp directory.
    #[must_use]
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `env`.
    #[must_use]
    pub fn path_for(&self, env: Environment) -> PathBuf {
        self.dir.join(format!("etims_token_{env}.json"))
    }
}

#[async_trait]
impl TokenCache for FileTokenCache {
    async fn load(&self, env: Environment) -> Option<CachedToken> {
        let path = self.path_for(env);
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "token cache unreadable");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "token cache corrupt, ignoring");
                None
            }
        }
    }

    async fn store(&self, env: Environment, token: &CachedToken) -> Result<()> {
        let dir = self.dir.clone();
        let path = self.path_for(env);
        let json = serde_json::to_vec(token)?;
        tokio::task::spawn_blocking(move || write_record(&dir, &path, &json))
            .await
            .map_err(|e| EtimsError::Storage(format!("token cache writer failed: {e}")))?
    }

    async fn clear(&self, env: Environment) -> Result<()> {
        let path = self.path_for(env);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(&path, &e)),
        }
    }
}

/// Atomically replaces `path` with `json` via a fresh temp file in `dir`.
///
/// `tempfile` creates the temp file with mode `0o600` on Unix and `persist`
/// keeps that mode.
fn write_record(dir: &Path, path: &Path, json: &[u8]) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| storage_err(dir, &e))?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".etims_token_")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| storage_err(dir, &e))?;
    tmp.write_all(json)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| storage_err(tmp.path(), &e))?;
    tmp.persist(path).map_err(|e| storage_err(path, &e.error))?;
    Ok(())
}

fn storage_err(path: &Path, e: &std::io::Error) -> EtimsError {
    EtimsError::Storage(format!("{}: {e}", path.display()))
}

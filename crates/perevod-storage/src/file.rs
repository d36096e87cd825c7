use std::path::{Path, PathBuf};

use crate::adapter::{BoxFuture, PersistenceAdapter};
use crate::error::{StorageError, validate_key};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temp file that is renamed over the target, so a crash
/// mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileAdapter {
    dir: PathBuf,
}

impl FileAdapter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PersistenceAdapter for FileAdapter {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Vec<u8>>, StorageError>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    tracing::debug!(path = %path.display(), bytes = bytes.len(), "value read from disk");
                    Ok(Some(bytes))
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "no value on disk");
                    Ok(None)
                }
                Err(e) => Err(StorageError::Read {
                    key: key.to_string(),
                    message: format!("{}: {e}", path.display()),
                }),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: Vec<u8>) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            let write_err = |e: std::io::Error| StorageError::Write {
                key: key.to_string(),
                message: format!("{}: {e}", path.display()),
            };

            tokio::fs::create_dir_all(&self.dir).await.map_err(write_err)?;

            // Write to a temp file then rename for atomicity
            let tmp_path = path.with_extension("json.tmp");
            tokio::fs::write(&tmp_path, &value).await.map_err(write_err)?;

            // Set restrictive permissions on Unix before renaming
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
                    .await
                    .map_err(write_err)?;
            }

            tokio::fs::rename(&tmp_path, &path).await.map_err(write_err)?;

            tracing::debug!(path = %path.display(), bytes = value.len(), "value written to disk");
            Ok(())
        })
    }
}

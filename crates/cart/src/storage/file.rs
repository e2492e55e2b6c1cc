//! File-backed storage backend.
//!
//! Each key maps to one file under a root directory. Writes go to a uniquely
//! named temporary file in the same directory that is then persisted over the
//! target, so a reader never sees a half-written snapshot and concurrent
//! writers never share a temporary file.

use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{CartStorage, StorageError};

/// Key-value storage on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `root`.
    ///
    /// The directory is created on first write, not here.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory holding the stored files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    ///
    /// Bytes outside `[A-Za-z0-9_-]` are percent-encoded, so distinct keys
    /// always get distinct files and `@GoMarketplace:cart` is stored as
    /// `%40GoMarketplace%3Acart.json`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + ".json".len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-') {
                name.push(char::from(byte));
            } else {
                name.push('%');
                name.push(hex_digit(byte >> 4));
                name.push(hex_digit(byte & 0x0F));
            }
        }
        name.push_str(".json");
        self.root.join(name)
    }
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).map_or('0', |c| c.to_ascii_uppercase())
}

/// Write `value` to `path` through a fresh temporary file in `dir`.
fn write_atomic(dir: &Path, path: &Path, value: &[u8]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(value)?;
    tmp.as_file().sync_all()?;
    // On failure the temporary file is dropped and removed.
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait::async_trait]
impl CartStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let root = self.root.clone();
        let path = self.path_for(key);
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&root, &target, value.as_bytes()))
            .await
            .map_err(|e| StorageError::Backend(format!("write task failed: {e}")))??;

        tracing::trace!(path = %path.display(), "Wrote storage file");
        Ok(())
    }
}

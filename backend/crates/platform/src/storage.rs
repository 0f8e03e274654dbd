//! Flat-File Storage Primitives
//!
//! Documents are replaced by writing a sibling temp file and renaming it
//! over the target, so readers never observe a partial write. There is no
//! locking: concurrent writers from different processes race and the last
//! rename wins.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::crypto::random_bytes;

/// Storage failure for a flat-file document
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed document {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to encode document {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
}

impl StorageError {
    pub fn malformed(path: &Path, reason: impl ToString) -> Self {
        StorageError::Malformed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn encode(path: &Path, reason: impl ToString) -> Self {
        StorageError::Encode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Read a whole file; `Ok(None)` when it does not exist
pub async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read a whole file that must exist
pub async fn read_required(path: &Path) -> Result<Vec<u8>, StorageError> {
    tokio::fs::read(path).await.map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `contents` via temp file + rename
///
/// Parent directories are created as needed.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp = temp_path_for(path);
    if let Err(e) = write_and_sync(&tmp, contents).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }

    Ok(())
}

async fn write_and_sync(tmp: &Path, contents: &[u8]) -> io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix: String = random_bytes(4).iter().map(|b| format!("{b:02x}")).collect();
    path.with_file_name(format!(".{file_name}.{suffix}.tmp"))
}

//! Directory-backed document store.
//!
//! Layout: `<dir>/<name>.json` for decks and `<dir>/<name>_state.json` for
//! draw states. Writes land in a temporary sibling first and are renamed
//! into place, so readers never observe a half-written document.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::{DocKind, DocumentStore};
use crate::errors::domain::{DomainError, ValidationKind};

const DECK_SUFFIX: &str = ".json";
const STATE_SUFFIX: &str = "_state.json";

#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    dir: PathBuf,
}

impl FsDocumentStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error("create decks directory", &dir, e))?;
        debug!(dir = %dir.display(), "document store ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, kind: DocKind, key: &str) -> Result<PathBuf, DomainError> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::validation(
                ValidationKind::InvalidDeckName,
                format!("'{key}' is not a valid deck name"),
            ));
        }
        let suffix = match kind {
            DocKind::Deck => DECK_SUFFIX,
            DocKind::DrawState => STATE_SUFFIX,
        };
        Ok(self.dir.join(format!("{key}{suffix}")))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn get(&self, kind: DocKind, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let path = self.path(kind, key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    async fn put(&self, kind: DocKind, key: &str, body: Vec<u8>) -> Result<(), DomainError> {
        let path = self.path(kind, key)?;
        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4().simple()));

        fs::write(&tmp, &body)
            .await
            .map_err(|e| io_error("write", &tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_error("replace", &path, e));
        }
        Ok(())
    }

    async fn delete(&self, kind: DocKind, key: &str) -> Result<bool, DomainError> {
        let path = self.path(kind, key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("delete", &path, e)),
        }
    }

    async fn keys(&self, kind: DocKind) -> Result<Vec<String>, DomainError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| io_error("list", &self.dir, e))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error("list", &self.dir, e))?
        {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(key) = key_for(kind, file_name) {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }
}

/// Deck key encoded in `file_name`, if it holds a document of `kind`.
fn key_for(kind: DocKind, file_name: &str) -> Option<&str> {
    if file_name.starts_with('.') {
        return None;
    }
    match kind {
        DocKind::DrawState => file_name.strip_suffix(STATE_SUFFIX),
        DocKind::Deck if file_name.ends_with(STATE_SUFFIX) => None,
        DocKind::Deck => file_name.strip_suffix(DECK_SUFFIX),
    }
    .filter(|key| !key.is_empty())
}

fn io_error(action: &str, path: &Path, e: io::Error) -> DomainError {
    DomainError::persistence(format!("failed to {action} {}: {e}", path.display()))
}

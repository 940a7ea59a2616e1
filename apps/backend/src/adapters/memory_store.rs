use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{DocKind, DocumentStore};
use crate::errors::domain::DomainError;

/// In-process store for tests and throwaway runs. Contents die with the process.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<HashMap<(DocKind, String), Vec<u8>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, kind: DocKind, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.docs.read().get(&(kind, key.to_string())).cloned())
    }

    async fn put(&self, kind: DocKind, key: &str, body: Vec<u8>) -> Result<(), DomainError> {
        self.docs.write().insert((kind, key.to_string()), body);
        Ok(())
    }

    async fn delete(&self, kind: DocKind, key: &str) -> Result<bool, DomainError> {
        Ok(self.docs.write().remove(&(kind, key.to_string())).is_some())
    }

    async fn keys(&self, kind: DocKind) -> Result<Vec<String>, DomainError> {
        Ok(self
            .docs
            .read()
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, key)| key.clone())
            .collect())
    }
}

//! Storage backends for deck and draw-state documents.
//!
//! Both document kinds are opaque JSON bytes keyed by a sanitized deck name.
//! Repos in `crate::repos` own the encoding; backends only move bytes.

use std::fmt::{self, Debug};

use async_trait::async_trait;

use crate::errors::domain::DomainError;

pub mod fs_store;
pub mod memory_store;

pub use fs_store::FsDocumentStore;
pub use memory_store::MemoryDocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    Deck,
    DrawState,
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocKind::Deck => f.write_str("deck"),
            DocKind::DrawState => f.write_str("draw state"),
        }
    }
}

/// Key-value document store, one document per (kind, deck name).
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    async fn get(&self, kind: DocKind, key: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Create or replace. Last write wins.
    async fn put(&self, kind: DocKind, key: &str, body: Vec<u8>) -> Result<(), DomainError>;

    /// Returns whether a document was removed.
    async fn delete(&self, kind: DocKind, key: &str) -> Result<bool, DomainError>;

    /// Keys holding a document of `kind`, in no particular order.
    async fn keys(&self, kind: DocKind) -> Result<Vec<String>, DomainError>;
}

use std::sync::Arc;

use super::random::SharedRandom;
use crate::adapters::DocumentStore;
use crate::domain::table::ResumePolicy;
use crate::services::table::TableRegistry;

/// Shared application state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tables: TableRegistry,
    pub random: SharedRandom,
    pub resume_policy: ResumePolicy,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        random: SharedRandom,
        resume_policy: ResumePolicy,
    ) -> Self {
        Self {
            store,
            tables: TableRegistry::default(),
            random,
            resume_policy,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// In-memory store, fixed seed, default policy.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(
            Arc::new(crate::adapters::MemoryDocumentStore::new()),
            SharedRandom::seeded(Some(7)),
            ResumePolicy::default(),
        )
    }
}

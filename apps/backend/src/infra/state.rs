use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{DocumentStore, FsDocumentStore, MemoryDocumentStore};
use crate::config::AppConfig;
use crate::domain::rng::RandomSource;
use crate::domain::table::ResumePolicy;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::random::SharedRandom;

enum StoreChoice {
    Memory,
    Dir(PathBuf),
    Given(Arc<dyn DocumentStore>),
}

/// Builder for [`AppState`], used by `main` and by tests.
///
/// Defaults to an in-memory store, OS-seeded randomness and the face-up
/// resume policy.
pub struct StateBuilder {
    store: StoreChoice,
    random: Option<SharedRandom>,
    rng_seed: Option<u64>,
    resume_policy: ResumePolicy,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            store: StoreChoice::Memory,
            random: None,
            rng_seed: None,
            resume_policy: ResumePolicy::default(),
        }
    }

    /// Everything `AppConfig` controls: decks directory, policy and seed.
    pub fn with_config(self, config: &AppConfig) -> Self {
        self.with_decks_dir(config.decks_dir.clone())
            .with_resume_policy(config.resume_policy)
            .with_rng_seed(config.rng_seed)
    }

    pub fn with_decks_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store = StoreChoice::Dir(dir.into());
        self
    }

    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = StoreChoice::Given(store);
        self
    }

    pub fn with_resume_policy(mut self, policy: ResumePolicy) -> Self {
        self.resume_policy = policy;
        self
    }

    pub fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Use a specific random source; wins over any seed.
    pub fn with_random(mut self, source: impl RandomSource + Send + 'static) -> Self {
        self.random = Some(SharedRandom::new(source));
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store: Arc<dyn DocumentStore> = match self.store {
            StoreChoice::Memory => Arc::new(MemoryDocumentStore::new()),
            StoreChoice::Dir(dir) => Arc::new(FsDocumentStore::open(dir).await.map_err(|e| {
                AppError::config(format!("decks directory unavailable: {e}"))
            })?),
            StoreChoice::Given(store) => store,
        };
        let random = self
            .random
            .unwrap_or_else(|| SharedRandom::seeded(self.rng_seed));

        Ok(AppState::new(store, random, self.resume_policy))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

use std::sync::Arc;

use cardtable::adapters::{DocumentStore, MemoryDocumentStore};
use cardtable::domain::rng::ScriptedSource;
use cardtable::domain::table::ResumePolicy;
use cardtable::infra::state::{build_state, StateBuilder};
use cardtable::services::catalog::CatalogService;
use cardtable::state::app_state::AppState;

/// Memory store and a fixed seed.
pub fn test_state_builder() -> StateBuilder {
    build_state().with_rng_seed(Some(0x5EED))
}

pub async fn build_test_state() -> AppState {
    test_state_builder()
        .build()
        .await
        .expect("in-memory state always builds")
}

/// State whose random picks are exactly `picks`, then zeros.
pub async fn scripted_state(
    picks: impl IntoIterator<Item = usize>,
    policy: ResumePolicy,
) -> AppState {
    build_state()
        .with_random(ScriptedSource::new(picks))
        .with_resume_policy(policy)
        .build()
        .await
        .expect("in-memory state always builds")
}

/// State over `store`, with a fixed seed.
pub async fn state_over(store: Arc<dyn DocumentStore>) -> AppState {
    test_state_builder()
        .with_store(store)
        .build()
        .await
        .expect("state with a given store always builds")
}

pub async fn import(state: &AppState, csv: &str) -> Vec<String> {
    CatalogService::new()
        .import_csv(state.store(), csv.as_bytes())
        .await
        .expect("fixture CSV imports")
}

pub fn memory_store() -> Arc<MemoryDocumentStore> {
    Arc::new(MemoryDocumentStore::new())
}

//! Deck documents.

use tracing::debug;

use crate::adapters::{DocKind, DocumentStore};
use crate::domain::deck::Deck;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub async fn load_deck(store: &dyn DocumentStore, name: &str) -> Result<Deck, DomainError> {
    let bytes = store
        .get(DocKind::Deck, name)
        .await?
        .ok_or_else(|| DomainError::deck_not_found(name))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("deck '{name}' is not a valid deck document: {e}"),
        )
    })
}

/// Create or overwrite the deck stored under `deck.name`.
pub async fn save_deck(store: &dyn DocumentStore, deck: &Deck) -> Result<(), DomainError> {
    let body = serde_json::to_vec_pretty(deck).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("failed to encode deck '{}': {e}", deck.name),
        )
    })?;
    store.put(DocKind::Deck, &deck.name, body).await?;
    debug!(deck = %deck.name, cards = deck.len(), "deck saved");
    Ok(())
}

/// Names of all stored decks, sorted.
pub async fn list_decks(store: &dyn DocumentStore) -> Result<Vec<String>, DomainError> {
    let mut names = store.keys(DocKind::Deck).await?;
    names.sort();
    Ok(names)
}

/// Delete a deck together with its draw state.
pub async fn delete_deck(store: &dyn DocumentStore, name: &str) -> Result<(), DomainError> {
    if !store.delete(DocKind::Deck, name).await? {
        return Err(DomainError::deck_not_found(name));
    }
    let had_state = store.delete(DocKind::DrawState, name).await?;
    debug!(deck = %name, had_state, "deck deleted");
    Ok(())
}

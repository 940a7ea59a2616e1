//! Deck catalog: CSV import plus list/get/delete over stored decks.

use time::OffsetDateTime;
use tracing::info;

use crate::adapters::DocumentStore;
use crate::domain::deck::Deck;
use crate::domain::records::{create_decks_from_records, parse_csv_records};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::decks;

pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    /// Create or overwrite decks from an uploaded CSV document.
    ///
    /// Returns the saved deck names in sorted order.
    pub async fn import_csv(
        &self,
        store: &dyn DocumentStore,
        body: &[u8],
    ) -> Result<Vec<String>, DomainError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DomainError::validation(
                ValidationKind::NoFile,
                "No file uploaded.",
            ));
        }

        let records = parse_csv_records(body)?;
        let decks = create_decks_from_records(records, OffsetDateTime::now_utc());
        if decks.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::NoValidRows,
                "No valid data found in CSV.",
            ));
        }

        let mut saved = Vec::with_capacity(decks.len());
        for (name, deck) in decks {
            decks::save_deck(store, &deck).await?;
            saved.push(name);
        }
        info!(decks = ?saved, "csv imported");
        Ok(saved)
    }

    pub async fn list(&self, store: &dyn DocumentStore) -> Result<Vec<String>, DomainError> {
        decks::list_decks(store).await
    }

    pub async fn get(&self, store: &dyn DocumentStore, name: &str) -> Result<Deck, DomainError> {
        decks::load_deck(store, name).await
    }

    pub async fn delete(&self, store: &dyn DocumentStore, name: &str) -> Result<(), DomainError> {
        decks::delete_deck(store, name).await?;
        info!(deck = %name, "deck deleted");
        Ok(())
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

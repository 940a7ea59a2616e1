//! Draw-state documents.
//!
//! The engine view ([`load_draw_state`]) is forgiving: anything that does not
//! describe a usable shuffle reads as "no state" and the table starts fresh.
//! The raw view backs the document endpoints and passes JSON through as-is.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::adapters::{DocKind, DocumentStore};
use crate::domain::draw::DrawState;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Stored shape with every field optional, so partial or hand-edited
/// documents still decode.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawStateDocument {
    shuffled_order: Option<Vec<usize>>,
    drawn_cards: Option<Vec<usize>>,
    current_card_index: Option<i64>,
}

impl DrawStateDocument {
    fn into_state(self) -> Option<DrawState> {
        let shuffled_order = self.shuffled_order.filter(|o| !o.is_empty())?;
        let drawn_cards = self.drawn_cards.unwrap_or_default();
        let current_card_index = self
            .current_card_index
            .unwrap_or(drawn_cards.len() as i64 - 1);
        Some(DrawState {
            shuffled_order,
            drawn_cards,
            current_card_index,
        })
    }
}

/// Saved draw state of `name`, or `None` when there is nothing usable.
pub async fn load_draw_state(
    store: &dyn DocumentStore,
    name: &str,
) -> Result<Option<DrawState>, DomainError> {
    let Some(bytes) = store.get(DocKind::DrawState, name).await? else {
        return Ok(None);
    };
    match serde_json::from_slice::<DrawStateDocument>(&bytes) {
        Ok(doc) => Ok(doc.into_state()),
        Err(e) => {
            warn!(deck = %name, error = %e, "ignoring unreadable draw state");
            Ok(None)
        }
    }
}

pub async fn save_draw_state(
    store: &dyn DocumentStore,
    name: &str,
    state: &DrawState,
) -> Result<(), DomainError> {
    let body = encode(name, state)?;
    store.put(DocKind::DrawState, name, body).await
}

/// Stored document as JSON; `{}` when none exists.
pub async fn load_raw_state(store: &dyn DocumentStore, name: &str) -> Result<Value, DomainError> {
    let Some(bytes) = store.get(DocKind::DrawState, name).await? else {
        return Ok(Value::Object(Default::default()));
    };
    serde_json::from_slice(&bytes).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("draw state of '{name}' is not valid JSON: {e}"),
        )
    })
}

/// Store `doc` verbatim. No shape validation.
pub async fn save_raw_state(
    store: &dyn DocumentStore,
    name: &str,
    doc: &Value,
) -> Result<(), DomainError> {
    let body = encode(name, doc)?;
    store.put(DocKind::DrawState, name, body).await
}

fn encode<T: serde::Serialize>(name: &str, doc: &T) -> Result<Vec<u8>, DomainError> {
    serde_json::to_vec_pretty(doc).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("failed to encode draw state of '{name}': {e}"),
        )
    })
}

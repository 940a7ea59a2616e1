//! JSON views returned by the table endpoints.

use serde::Serialize;

use crate::domain::action::ActionState;
use crate::domain::cards::{ActionOffer, Card};
use crate::domain::table::TablePhase;

pub const DECK_EXHAUSTED_MESSAGE: &str = "Deck is empty. Reshuffling...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    DeckExhausted,
    PersistenceFailure,
}

/// Non-blocking message for the client; the request itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn deck_exhausted() -> Self {
        Self {
            kind: NoticeKind::DeckExhausted,
            message: DECK_EXHAUSTED_MESSAGE.to_string(),
        }
    }

    pub fn persistence_failure() -> Self {
        Self {
            kind: NoticeKind::PersistenceFailure,
            message: "Progress could not be saved.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleCard {
    pub index: usize,
    #[serde(flatten)]
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub deck: String,
    pub phase: TablePhase,
    pub remaining: usize,
    pub total: usize,
    pub back_icon: String,
    pub card: Option<VisibleCard>,
    pub offer: ActionOffer,
    pub action: ActionState,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionView {
    pub deck: String,
    pub card_index: Option<usize>,
    pub offer: ActionOffer,
    pub action: ActionState,
}

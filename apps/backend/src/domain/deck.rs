//! Deck documents.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::cards::{Card, DEFAULT_BACK_ICON};

/// A named, ordered collection of cards.
///
/// `name` is the storage key and is always filesystem-safe (see
/// [`sanitize_deck_name`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(with = "time::serde::rfc3339", default = "unix_epoch")]
    pub updated_at: OffsetDateTime,
}

fn unix_epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

impl Deck {
    pub fn new(name: impl Into<String>, updated_at: OffsetDateTime) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
            updated_at,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at a position of the original deck order.
    ///
    /// Returns `None` for indices past the end, which happens when a deck is
    /// re-uploaded with fewer cards after a shuffle.
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Icon shown on the back of the stack: the first card's, if any.
    pub fn back_icon(&self) -> &str {
        self.cards
            .first()
            .map(|c| c.back_icon.as_str())
            .unwrap_or(DEFAULT_BACK_ICON)
    }
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_deck_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

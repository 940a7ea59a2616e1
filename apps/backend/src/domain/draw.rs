//! The draw engine: shuffle, draw and reset over a persisted [`DrawState`].
//!
//! Every function here is pure. The caller owns the state, decides when to
//! persist it and reacts to [`DeckExhausted`]; the engine never reshuffles on
//! its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rng::RandomSource;

/// Persisted progress through one deck.
///
/// Field names are part of the stored document format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawState {
    /// Permutation of card indices fixed at the last shuffle.
    pub shuffled_order: Vec<usize>,
    /// Append-only history of revealed card indices.
    pub drawn_cards: Vec<usize>,
    /// Position in `shuffled_order` of the card on top; `-1` before the first draw.
    pub current_card_index: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no cards left in the shuffle order")]
pub struct DeckExhausted;

impl DrawState {
    /// Card index on top of the discard pile, if anything was drawn.
    pub fn current_card(&self) -> Option<usize> {
        usize::try_from(self.current_card_index)
            .ok()
            .and_then(|pos| self.shuffled_order.get(pos).copied())
    }

    pub fn has_history(&self) -> bool {
        !self.drawn_cards.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_position().is_none()
    }

    fn next_position(&self) -> Option<usize> {
        let next = usize::try_from(self.current_card_index.checked_add(1)?).ok()?;
        (next < self.shuffled_order.len()).then_some(next)
    }
}

/// Fresh state over a uniformly random permutation of `0..deck_size`.
///
/// Fisher–Yates: walk `i` from the last position down to 1, pick `j` in
/// `0..=i`, swap.
pub fn shuffle<R: RandomSource + ?Sized>(deck_size: usize, rng: &mut R) -> DrawState {
    let mut order: Vec<usize> = (0..deck_size).collect();
    for i in (1..order.len()).rev() {
        let j = rng.up_to(i);
        order.swap(i, j);
    }
    DrawState {
        shuffled_order: order,
        drawn_cards: Vec::new(),
        current_card_index: -1,
    }
}

/// Explicit reshuffle; discards all history.
pub fn reset<R: RandomSource + ?Sized>(deck_size: usize, rng: &mut R) -> DrawState {
    shuffle(deck_size, rng)
}

/// Reveal the next card.
///
/// Returns the advanced state and the revealed card index. At the end of
/// the order the input is left as it was and [`DeckExhausted`] is returned.
pub fn draw(state: &DrawState) -> Result<(DrawState, usize), DeckExhausted> {
    let next = state.next_position().ok_or(DeckExhausted)?;
    let card = state.shuffled_order[next];

    let mut drawn_cards = state.drawn_cards.clone();
    drawn_cards.push(card);

    let advanced = DrawState {
        shuffled_order: state.shuffled_order.clone(),
        drawn_cards,
        current_card_index: next as i64,
    };
    Ok((advanced, card))
}

/// Cards not yet drawn in this shuffle.
pub fn remaining_count(state: &DrawState) -> usize {
    state
        .shuffled_order
        .len()
        .saturating_sub(state.drawn_cards.len())
}

//! Domain layer: pure deck and card-action logic.
//!
//! Nothing in here touches storage, HTTP or the clock. Randomness comes in
//! through [`rng::RandomSource`] so every transition is reproducible in tests.

pub mod action;
pub mod cards;
pub mod deck;
pub mod dice;
pub mod draw;
pub mod records;
pub mod rng;
pub mod table;
pub mod timer;

// Re-exports for ergonomics
pub use action::{ActionError, ActionKind, ActionState};
pub use cards::{ActionOffer, ActionType, Card};
pub use deck::{sanitize_deck_name, Deck};
pub use draw::{draw, remaining_count, reset, shuffle, DeckExhausted, DrawState};
pub use records::{create_decks_from_records, parse_csv_records, Record};
pub use rng::{RandomSource, RngSource, ScriptedSource};
pub use table::{DrawOutcome, ResumePolicy, Table, TablePhase};
pub use timer::{Timer, TimerOp, TimerPhase};

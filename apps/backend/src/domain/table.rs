//! Presentation state of one open deck on top of the draw engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::draw::{self, DrawState};
use super::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TablePhase {
    /// Deck back on display; nothing revealed in this shuffle yet, or the
    /// session was resumed face-down.
    WaitingToStart,
    FaceShown,
}

/// How a session reopened with draw history is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResumePolicy {
    /// Show the last drawn card again.
    #[default]
    FaceUp,
    /// Show the deck back; the next draw reveals the next card.
    FaceDown,
}

impl fmt::Display for ResumePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumePolicy::FaceUp => f.write_str("face-up"),
            ResumePolicy::FaceDown => f.write_str("face-down"),
        }
    }
}

impl FromStr for ResumePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "face-up" | "face_up" => Ok(ResumePolicy::FaceUp),
            "face-down" | "face_down" => Ok(ResumePolicy::FaceDown),
            other => Err(format!(
                "unknown resume policy '{other}', expected face-up or face-down"
            )),
        }
    }
}

/// Result of a draw request at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Revealed { card_index: usize },
    /// The order was used up; a new one was shuffled and the deck back is
    /// showing again.
    Reshuffled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    state: DrawState,
    phase: TablePhase,
}

impl Table {
    pub fn start<R: RandomSource + ?Sized>(deck_size: usize, rng: &mut R) -> Self {
        Self {
            state: draw::shuffle(deck_size, rng),
            phase: TablePhase::WaitingToStart,
        }
    }

    /// Rebuild a table from a saved draw state.
    ///
    /// The boolean is `true` when no usable state existed and a new shuffle
    /// was made; the caller should persist it.
    pub fn resume<R: RandomSource + ?Sized>(
        saved: Option<DrawState>,
        deck_size: usize,
        policy: ResumePolicy,
        rng: &mut R,
    ) -> (Self, bool) {
        let Some(state) = saved.filter(|s| !s.shuffled_order.is_empty()) else {
            return (Self::start(deck_size, rng), true);
        };

        let phase = match policy {
            ResumePolicy::FaceUp if state.has_history() => TablePhase::FaceShown,
            _ => TablePhase::WaitingToStart,
        };
        (Self { state, phase }, false)
    }

    pub fn draw<R: RandomSource + ?Sized>(&mut self, deck_size: usize, rng: &mut R) -> DrawOutcome {
        match draw::draw(&self.state) {
            Ok((next, card_index)) => {
                self.state = next;
                self.phase = TablePhase::FaceShown;
                DrawOutcome::Revealed { card_index }
            }
            Err(draw::DeckExhausted) => {
                self.state = draw::shuffle(deck_size, rng);
                self.phase = TablePhase::WaitingToStart;
                DrawOutcome::Reshuffled
            }
        }
    }

    pub fn reset<R: RandomSource + ?Sized>(&mut self, deck_size: usize, rng: &mut R) {
        self.state = draw::reset(deck_size, rng);
        self.phase = TablePhase::WaitingToStart;
    }

    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Card index face up on the table, if any.
    pub fn visible_card(&self) -> Option<usize> {
        match self.phase {
            TablePhase::FaceShown => self.state.current_card(),
            TablePhase::WaitingToStart => None,
        }
    }

    pub fn remaining(&self) -> usize {
        draw::remaining_count(&self.state)
    }

    pub fn total(&self) -> usize {
        self.state.shuffled_order.len()
    }
}

//! Ephemeral action state of the visible card.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::cards::ActionOffer;
use super::dice::Dice;
use super::rng::RandomSource;
use super::timer::{Timer, TimerOp, TimerPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Timer,
    Dice,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Timer => f.write_str("timer"),
            ActionKind::Dice => f.write_str("dice"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("card has no valid {action} value")]
    InvalidActionValue { action: ActionKind },
    #[error("cannot {op} a timer that is {from}")]
    InvalidTransition { op: TimerOp, from: TimerPhase },
}

/// Timer and dice state scoped to one displayed card.
///
/// Built fresh from the card's [`ActionOffer`] whenever the visible card
/// changes; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActionState {
    #[serde(skip)]
    offer: ActionOffer,
    pub timer: Timer,
    pub dice: Dice,
}

impl ActionState {
    pub fn for_card(offer: ActionOffer) -> Self {
        Self {
            offer,
            timer: Timer::default(),
            dice: Dice::default(),
        }
    }

    pub fn offer(&self) -> ActionOffer {
        self.offer
    }

    /// Start the card's timer with its configured duration.
    ///
    /// A card without a usable duration leaves the state untouched.
    pub fn start_timer(&mut self) -> Result<(), ActionError> {
        let seconds = self.offer.timer_seconds.ok_or(ActionError::InvalidActionValue {
            action: ActionKind::Timer,
        })?;
        self.timer.start(seconds)
    }

    pub fn roll_dice<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<u32, ActionError> {
        let sides = self.offer.dice_sides.ok_or(ActionError::InvalidActionValue {
            action: ActionKind::Dice,
        })?;
        self.dice.roll(sides, rng)
    }
}

//! Dice rolls.

use serde::Serialize;

use super::action::{ActionError, ActionKind};
use super::rng::RandomSource;

/// Uniform roll in `1..=sides`.
pub fn roll<R: RandomSource + ?Sized>(sides: u32, rng: &mut R) -> Result<u32, ActionError> {
    if sides == 0 {
        return Err(ActionError::InvalidActionValue {
            action: ActionKind::Dice,
        });
    }
    let face = rng.up_to(sides as usize - 1) as u32 + 1;
    Ok(face)
}

/// Last roll of the visible card, kept only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dice {
    pub last_roll: Option<u32>,
}

impl Dice {
    pub fn roll<R: RandomSource + ?Sized>(
        &mut self,
        sides: u32,
        rng: &mut R,
    ) -> Result<u32, ActionError> {
        let face = roll(sides, rng)?;
        self.last_roll = Some(face);
        Ok(face)
    }
}

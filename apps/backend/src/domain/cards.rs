//! Card model and action-value parsing.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_BACK_ICON: &str = "fa-question";

/// Which mini-game a card carries.
///
/// Unknown strings read as [`ActionType::None`] so a typo in a CSV never
/// breaks a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ActionType {
    #[default]
    None,
    Timer,
    Dice,
    Both,
}

impl ActionType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "timer" => ActionType::Timer,
            "dice" => ActionType::Dice,
            "both" => ActionType::Both,
            _ => ActionType::None,
        }
    }

    pub fn has_timer(self) -> bool {
        matches!(self, ActionType::Timer | ActionType::Both)
    }

    pub fn has_dice(self) -> bool {
        matches!(self, ActionType::Dice | ActionType::Both)
    }
}

impl From<String> for ActionType {
    fn from(raw: String) -> Self {
        ActionType::parse(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    /// Markdown, rendered by the client.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub action_type: ActionType,
    /// Comma-separated numbers; meaning depends on `action_type`.
    #[serde(default)]
    pub action_value: String,
    #[serde(default = "default_back_icon")]
    pub back_icon: String,
}

fn default_back_icon() -> String {
    DEFAULT_BACK_ICON.to_string()
}

/// The actions a card actually offers once its `action_value` is parsed.
///
/// A `None` field means the affordance is not rendered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOffer {
    pub timer_seconds: Option<u32>,
    pub dice_sides: Option<u32>,
}

impl ActionOffer {
    pub fn is_empty(&self) -> bool {
        self.timer_seconds.is_none() && self.dice_sides.is_none()
    }
}

impl Card {
    pub fn offer(&self) -> ActionOffer {
        let values: Vec<&str> = self.action_value.split(',').collect();
        let at = |i: usize| values.get(i).and_then(|raw| parse_positive(raw));

        match self.action_type {
            ActionType::None => ActionOffer::default(),
            ActionType::Timer => ActionOffer {
                timer_seconds: at(0),
                dice_sides: None,
            },
            ActionType::Dice => ActionOffer {
                timer_seconds: None,
                dice_sides: at(0),
            },
            ActionType::Both => ActionOffer {
                timer_seconds: at(0),
                dice_sides: at(1),
            },
        }
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

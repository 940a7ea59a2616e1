//! Error codes for the card table API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the card table API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Deck name is empty after sanitizing
    InvalidDeckName,
    /// Upload without a body
    NoFile,
    /// Upload body is not parseable CSV
    InvalidCsv,
    /// CSV had no row carrying a deck name
    NoValidRows,
    /// Card action value missing or not a positive integer
    InvalidActionValue,
    /// Timer control not allowed from the current phase
    InvalidTimerTransition,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Deck document does not exist
    DeckNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Reading or writing a document failed
    PersistenceFailure,
    /// Stored document could not be decoded
    DataCorruption,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidDeckName => "INVALID_DECK_NAME",
            Self::NoFile => "NO_FILE",
            Self::InvalidCsv => "INVALID_CSV",
            Self::NoValidRows => "NO_VALID_ROWS",
            Self::InvalidActionValue => "INVALID_ACTION_VALUE",
            Self::InvalidTimerTransition => "INVALID_TIMER_TRANSITION",
            Self::BadRequest => "BAD_REQUEST",

            Self::DeckNotFound => "DECK_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::PersistenceFailure => "PERSISTENCE_FAILURE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

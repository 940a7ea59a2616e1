use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::deck::sanitize_deck_name;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Deck name from the `{name}` path segment, made filesystem-safe.
///
/// Sanitizing matches what the CSV import does, so `Party Night` and
/// `Party_Night` address the same deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckName(pub String);

impl DeckName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for DeckName {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req.match_info().get("name")))
    }
}

fn parse(raw: Option<&str>) -> Result<DeckName, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidDeckName, "Missing deck name")
    })?;
    let name = sanitize_deck_name(raw.trim());
    if name.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::InvalidDeckName,
            "Deck name must not be empty",
        ));
    }
    Ok(DeckName(name))
}

//! CSV rows into decks.
//!
//! Rows are kept as flat `header -> value` maps; only `deck_name` is
//! required. Everything else falls back to a default.

use std::collections::{BTreeMap, HashMap};

use time::OffsetDateTime;

use super::cards::{ActionType, Card, DEFAULT_BACK_ICON, DEFAULT_TITLE};
use super::deck::{sanitize_deck_name, Deck};
use crate::errors::domain::{DomainError, ValidationKind};

pub type Record = HashMap<String, String>;

/// Parse a CSV document with a header row into flat records.
///
/// Short rows are accepted; missing trailing columns are simply absent from
/// the record.
pub fn parse_csv_records(input: &[u8]) -> Result<Vec<Record>, DomainError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        records.push(record);
    }
    Ok(records)
}

fn csv_error(e: csv::Error) -> DomainError {
    DomainError::validation(
        ValidationKind::InvalidCsv,
        format!("Failed to parse CSV: {e}"),
    )
}

/// Group records by `deck_name` into decks.
///
/// Rows whose deck name is missing or blank are skipped. Names are
/// sanitized, so two spellings that sanitize to the same key end up in one
/// deck. Card order follows row order.
pub fn create_decks_from_records<I>(
    records: I,
    updated_at: OffsetDateTime,
) -> BTreeMap<String, Deck>
where
    I: IntoIterator<Item = Record>,
{
    let mut decks: BTreeMap<String, Deck> = BTreeMap::new();

    for record in records {
        let Some(raw_name) = field(&record, "deck_name") else {
            continue;
        };
        let name = sanitize_deck_name(raw_name.trim());
        if name.is_empty() {
            continue;
        }

        let card = Card {
            title: field(&record, "title").unwrap_or(DEFAULT_TITLE).to_string(),
            body: field(&record, "body").unwrap_or_default().to_string(),
            action_type: field(&record, "action_type")
                .map(ActionType::parse)
                .unwrap_or_default(),
            action_value: field(&record, "action_value")
                .unwrap_or_default()
                .to_string(),
            back_icon: field(&record, "back_icon")
                .unwrap_or(DEFAULT_BACK_ICON)
                .to_string(),
        };

        decks
            .entry(name.clone())
            .or_insert_with(|| Deck::new(name, updated_at))
            .cards
            .push(card);
    }

    decks
}

/// A non-empty field value; empty strings count as missing.
fn field<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

//! Typed access to the document store.
//!
//! Repos are free functions over `&dyn DocumentStore`; they own the JSON
//! encoding of each document kind and map storage failures to
//! [`DomainError`](crate::errors::domain::DomainError).

pub mod decks;
pub mod draw_states;

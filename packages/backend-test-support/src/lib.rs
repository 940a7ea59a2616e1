//! Shared helpers for the backend's integration tests: idempotent logging
//! setup and assertions on RFC 7807 problem responses.

pub mod logging;
pub mod problem_details;

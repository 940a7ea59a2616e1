//! Domain-level error type used across services and repos.
//!
//! This error type is HTTP- and storage-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::action::ActionError;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// Reading or writing a document failed
    Persistence,
    /// A stored document could not be encoded or decoded
    DataCorruption,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Deck,
}

/// Validation failures, each mapping to a distinct error code
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidDeckName,
    NoFile,
    InvalidCsv,
    NoValidRows,
    InvalidActionValue,
    InvalidTimerTransition,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn persistence(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::Persistence, detail.into())
    }

    pub fn deck_not_found(name: &str) -> Self {
        Self::NotFound(NotFoundKind::Deck, format!("Deck '{name}' not found"))
    }

    /// True for failures of the document store rather than of the request.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Infra(InfraErrorKind::Persistence | InfraErrorKind::DataCorruption, _)
        )
    }
}

impl From<ActionError> for DomainError {
    fn from(e: ActionError) -> Self {
        let kind = match e {
            ActionError::InvalidActionValue { .. } => ValidationKind::InvalidActionValue,
            ActionError::InvalidTransition { .. } => ValidationKind::InvalidTimerTransition,
        };
        DomainError::validation(kind, e.to_string())
    }
}

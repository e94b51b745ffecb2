//! Raffle use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into caller-facing operations.
//! - Own the transactional boundary: one write scope per mutation.
//! - Translate storage outcomes into the raffle error taxonomy.
//!
//! # Invariants
//! - Input is validated before any storage access.
//! - A failed operation commits nothing.

use crate::db::DbError;
use crate::model::participant::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod draw_service;
pub mod roster_service;

pub type RaffleResult<T> = Result<T, RaffleError>;

/// Error returned by every raffle operation.
///
/// All variants except `Store` are caller-recoverable and safe to show.
#[derive(Debug)]
pub enum RaffleError {
    /// Malformed or missing input.
    Validation(ValidationError),
    /// Participant name already present.
    DuplicateKey(String),
    /// Participant name absent from the roster.
    NotFound(String),
    /// Drawer is not in the availability pool.
    AlreadyDrawnOrUnknown(String),
    /// Every other participant has already been picked.
    NoEligibleRecipients(String),
    /// Underlying storage failure.
    Store(RepoError),
}

impl RaffleError {
    /// Stable machine-readable code for boundary layers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyDrawnOrUnknown(_) => "ALREADY_DRAWN_OR_UNKNOWN",
            Self::NoEligibleRecipients(_) => "NO_ELIGIBLE_RECIPIENTS",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

impl Display for RaffleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateKey(name) => write!(f, "participant already exists: {name}"),
            Self::NotFound(name) => write!(f, "participant not found: {name}"),
            Self::AlreadyDrawnOrUnknown(name) => {
                write!(f, "participant has already drawn or is unknown: {name}")
            }
            Self::NoEligibleRecipients(name) => {
                write!(f, "no names left to draw for participant: {name}")
            }
            Self::Store(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for RaffleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RaffleError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for RaffleError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateKey(name) => Self::DuplicateKey(name),
            RepoError::NotFound(name) => Self::NotFound(name),
            other => Self::Store(other),
        }
    }
}

impl From<DbError> for RaffleError {
    fn from(value: DbError) -> Self {
        Self::Store(RepoError::Db(value))
    }
}

impl From<rusqlite::Error> for RaffleError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(RepoError::from(value))
    }
}

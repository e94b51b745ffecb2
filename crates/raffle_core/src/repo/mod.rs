//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define one data access contract per store (roster, pool, ledger).
//! - Isolate SQL details from use-case orchestration.
//! - Translate SQLite uniqueness failures into semantic errors.
//!
//! # Invariants
//! - Repositories never open transactions themselves; callers pass a
//!   connection or an open transaction and own the commit.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateKey`) in
//!   addition to DB transport errors.

use crate::db::DbError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod availability_repo;
pub mod ledger_repo;
pub mod roster_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all raffle stores.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Unique key already present; carries the conflicting key.
    DuplicateKey(String),
    /// Referenced row absent; carries the looked-up key.
    NotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateKey(key) => write!(f, "duplicate key: {key}"),
            Self::NotFound(key) => write!(f, "not found: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted raffle data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateKey(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a failed insert to `DuplicateKey(key)` when SQLite reports a
/// unique-constraint violation, otherwise to a transport error.
pub(crate) fn map_insert_error(err: rusqlite::Error, key: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateKey(key.to_string())
        }
        _ => RepoError::from(err),
    }
}

pub(crate) fn count_to_u64(value: i64, table: &str) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative row count {value} in {table}")))
}

//! Core domain logic for the gift-exchange raffle.
//! This crate is the single source of truth for draw invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::participant::{
    DrawOutcome, DrawRecord, Participant, RaffleStats, ValidationError,
};
pub use repo::availability_repo::{AvailabilityRepository, SqliteAvailabilityRepository};
pub use repo::ledger_repo::{LedgerRepository, SqliteLedgerRepository};
pub use repo::roster_repo::{RosterRepository, SqliteRosterRepository};
pub use repo::{RepoError, RepoResult};
pub use service::draw_service::{draw_in_scope, DrawService};
pub use service::roster_service::{RosterService, TEST_PARTICIPANTS};
pub use service::{RaffleError, RaffleResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

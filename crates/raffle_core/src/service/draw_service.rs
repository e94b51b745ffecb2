//! Draw engine and raffle-wide read models.
//!
//! # Responsibility
//! - Perform one draw as a single write transaction.
//! - Reset the raffle back to "nobody has drawn".
//! - Serve pool, history and progress views.
//!
//! # Invariants
//! - Nobody draws themselves.
//! - Each recipient is picked by at most one drawer.
//! - A drawer leaves the pool in the same transaction that records the draw.
//! - Eligibility is recomputed from committed state on every draw.
//!
//! # See also
//! - `service::roster_service` for the operations that grow or shrink the pool.

use crate::db::begin_write;
use crate::model::participant::{normalize_name, DrawOutcome, DrawRecord, RaffleStats};
use crate::repo::availability_repo::{AvailabilityRepository, SqliteAvailabilityRepository};
use crate::repo::ledger_repo::{LedgerRepository, SqliteLedgerRepository};
use crate::repo::roster_repo::{RosterRepository, SqliteRosterRepository};
use crate::repo::RepoError;
use crate::service::{RaffleError, RaffleResult};
use log::{debug, info, Level};
use rand::Rng;
use rusqlite::Connection;
use std::time::Instant;

/// Draw use-case service over one SQLite connection.
pub struct DrawService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> DrawService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Draws a recipient for `participant` using the thread-local RNG.
    pub fn draw(&mut self, participant: &str) -> RaffleResult<DrawOutcome> {
        self.draw_with_rng(participant, &mut rand::thread_rng())
    }

    /// Draws a recipient for `participant` using `rng` for selection.
    ///
    /// # Errors
    /// - `Validation` for a blank name.
    /// - `AlreadyDrawnOrUnknown` when `participant` is not in the pool.
    /// - `NoEligibleRecipients` when everyone else has been picked.
    /// - `Store` for storage failures; nothing is committed.
    pub fn draw_with_rng<G: Rng>(
        &mut self,
        participant: &str,
        rng: &mut G,
    ) -> RaffleResult<DrawOutcome> {
        let started_at = Instant::now();
        let participant = normalize_name(participant)?;

        let tx = begin_write(self.conn)?;
        let drawn = draw_in_scope(
            &SqliteRosterRepository::new(&tx),
            &SqliteAvailabilityRepository::new(&tx),
            &SqliteLedgerRepository::new(&tx),
            &participant,
            rng,
        );
        let committed = drawn.and_then(|outcome| {
            tx.commit()?;
            Ok(outcome)
        });
        let outcome = match committed {
            Ok(outcome) => outcome,
            Err(err) => {
                let detail = match &err {
                    RaffleError::Store(source) => source.to_string(),
                    _ => "-".to_string(),
                };
                log::log!(
                    failure_level(&err),
                    "event=draw module=draw status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    detail
                );
                return Err(err);
            }
        };

        info!(
            "event=draw module=draw status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        debug!(
            "event=draw module=draw participant={} picked_name={}",
            outcome.participant, outcome.picked_name
        );
        Ok(outcome)
    }

    /// Clears the ledger and refills the pool from the full roster.
    ///
    /// Calling it twice in a row yields the same state.
    pub fn reset(&mut self) -> RaffleResult<()> {
        let tx = begin_write(self.conn)?;
        let roster = SqliteRosterRepository::new(&tx).list()?;
        SqliteLedgerRepository::new(&tx).clear()?;
        SqliteAvailabilityRepository::new(&tx).repopulate_from(&roster)?;
        tx.commit()?;

        info!(
            "event=raffle_reset module=draw status=ok pooled={}",
            roster.len()
        );
        Ok(())
    }

    /// Names still allowed to draw, ordered by name.
    pub fn available_participants(&self) -> RaffleResult<Vec<String>> {
        Ok(SqliteAvailabilityRepository::new(self.conn).list_names()?)
    }

    /// Full draw history, newest first.
    pub fn list_draws(&self) -> RaffleResult<Vec<DrawRecord>> {
        Ok(SqliteLedgerRepository::new(self.conn).list_draws()?)
    }

    /// Roster, ledger and pool sizes read from one snapshot.
    pub fn stats(&mut self) -> RaffleResult<RaffleStats> {
        let tx = self.conn.transaction()?;
        let stats = RaffleStats {
            total: SqliteRosterRepository::new(&tx).count()?,
            drawn: SqliteLedgerRepository::new(&tx).count()?,
            remaining: SqliteAvailabilityRepository::new(&tx).count()?,
        };
        tx.commit()?;
        Ok(stats)
    }
}

/// Caller mistakes log at info; storage failures log at error.
fn failure_level(err: &RaffleError) -> Level {
    match err {
        RaffleError::Store(_) => Level::Error,
        _ => Level::Info,
    }
}

/// Runs the draw steps against stores that already share one transaction.
///
/// The caller commits on `Ok` and drops the transaction on `Err`.
pub fn draw_in_scope<G: Rng>(
    roster: &impl RosterRepository,
    pool: &impl AvailabilityRepository,
    ledger: &impl LedgerRepository,
    participant: &str,
    rng: &mut G,
) -> RaffleResult<DrawOutcome> {
    if !pool.is_available(participant)? || ledger.has_drawn(participant)? {
        return Err(RaffleError::AlreadyDrawnOrUnknown(participant.to_string()));
    }

    let picked = ledger.picked_names()?;
    let eligible = roster
        .names()?
        .into_iter()
        .filter(|name| name != participant && !picked.contains(name))
        .collect::<Vec<_>>();
    if eligible.is_empty() {
        return Err(RaffleError::NoEligibleRecipients(participant.to_string()));
    }

    let picked_name = eligible[rng.gen_range(0..eligible.len())].clone();
    let mission = roster.get_mission(&picked_name)?.ok_or_else(|| {
        RepoError::InvalidData(format!("eligible recipient `{picked_name}` has no mission"))
    })?;

    ledger.record(participant, &picked_name, &mission)?;
    pool.remove(participant)?;

    Ok(DrawOutcome {
        participant: participant.to_string(),
        picked_name,
        mission,
    })
}

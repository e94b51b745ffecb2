//! Roster management use-cases.
//!
//! # Responsibility
//! - Add, remove and edit participants together with their pool mirror.
//! - Seed a sample roster and wipe all raffle state for testing.
//!
//! # Invariants
//! - A newly added participant is immediately eligible to draw.
//! - Removing a participant leaves historical ledger rows untouched.
//! - Mission edits never rewrite missions already copied into the ledger.

use crate::db::begin_write;
use crate::model::participant::{normalize_name, normalize_mission, Participant};
use crate::repo::availability_repo::{AvailabilityRepository, SqliteAvailabilityRepository};
use crate::repo::ledger_repo::{LedgerRepository, SqliteLedgerRepository};
use crate::repo::roster_repo::{RosterRepository, SqliteRosterRepository};
use crate::service::{RaffleError, RaffleResult};
use log::{debug, info};
use rusqlite::Connection;

/// Fixture roster inserted by `seed_test_participants`.
pub const TEST_PARTICIPANTS: &[(&str, &str)] = &[
    ("Test Person 1", "Buy something funny for the test"),
    ("Test Person 2", "Buy something cozy for the test"),
    ("Test Person 3", "Buy something practical for the test"),
    ("Test Person 4", "Buy something creative for the test"),
    ("Test Person 5", "Buy something handmade for the test"),
];

/// Roster use-case service over one SQLite connection.
pub struct RosterService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> RosterService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Adds a participant to the roster and the availability pool.
    ///
    /// A name that still has a ledger row from before a removal goes back on
    /// the roster only; it stays out of the pool until `reset`.
    ///
    /// # Errors
    /// - `Validation` for blank name or mission.
    /// - `DuplicateKey` when the name is already on the roster or pooled.
    pub fn add_participant(&mut self, name: &str, mission: &str) -> RaffleResult<Participant> {
        let participant = Participant::new(name, mission)?;

        let tx = begin_write(self.conn)?;
        SqliteRosterRepository::new(&tx).insert(&participant)?;
        let has_drawn = SqliteLedgerRepository::new(&tx).has_drawn(&participant.name)?;
        if !has_drawn {
            SqliteAvailabilityRepository::new(&tx).insert(&participant)?;
        }
        tx.commit()?;

        info!("event=participant_add module=roster status=ok pooled={}", !has_drawn);
        debug!("event=participant_add module=roster name={}", participant.name);
        Ok(participant)
    }

    /// Removes a participant from the roster and the availability pool.
    ///
    /// # Errors
    /// - `NotFound` when the name is not on the roster; a blank name never is.
    pub fn remove_participant(&mut self, name: &str) -> RaffleResult<()> {
        let name =
            normalize_name(name).map_err(|_| RaffleError::NotFound(name.trim().to_string()))?;

        let tx = begin_write(self.conn)?;
        SqliteRosterRepository::new(&tx).delete(&name)?;
        let was_pooled = SqliteAvailabilityRepository::new(&tx).remove(&name)?;
        tx.commit()?;

        info!("event=participant_remove module=roster status=ok was_pooled={was_pooled}");
        Ok(())
    }

    /// Replaces a participant's mission in the roster and its pool mirror.
    ///
    /// # Errors
    /// - `Validation` for blank name or mission.
    /// - `NotFound` when the name is not on the roster.
    pub fn update_mission(&mut self, name: &str, mission: &str) -> RaffleResult<Participant> {
        let participant = Participant {
            name: normalize_name(name)?,
            mission: normalize_mission(mission)?,
        };

        let tx = begin_write(self.conn)?;
        SqliteRosterRepository::new(&tx).update_mission(&participant.name, &participant.mission)?;
        SqliteAvailabilityRepository::new(&tx)
            .update_mission(&participant.name, &participant.mission)?;
        tx.commit()?;

        info!("event=mission_update module=roster status=ok");
        Ok(participant)
    }

    /// Lists the roster ordered by name.
    pub fn list_participants(&self) -> RaffleResult<Vec<Participant>> {
        Ok(SqliteRosterRepository::new(self.conn).list()?)
    }

    /// Inserts `TEST_PARTICIPANTS`, skipping names already on the roster.
    ///
    /// Returns how many roster rows were written.
    pub fn seed_test_participants(&mut self) -> RaffleResult<usize> {
        let tx = begin_write(self.conn)?;
        let roster = SqliteRosterRepository::new(&tx);
        let pool = SqliteAvailabilityRepository::new(&tx);
        let ledger = SqliteLedgerRepository::new(&tx);
        let mut inserted = 0;
        for (name, mission) in TEST_PARTICIPANTS {
            let participant = Participant::new(name, mission)?;
            // Existing names keep their current draw state.
            if roster.insert_if_absent(&participant)? {
                if !ledger.has_drawn(&participant.name)? {
                    pool.insert_if_absent(&participant)?;
                }
                inserted += 1;
            }
        }
        tx.commit()?;

        info!(
            "event=roster_seed module=roster status=ok offered={} inserted={}",
            TEST_PARTICIPANTS.len(),
            inserted
        );
        Ok(inserted)
    }

    /// Deletes every draw, pool entry and participant in one transaction.
    pub fn clear_all(&mut self) -> RaffleResult<()> {
        let tx = begin_write(self.conn)?;
        SqliteLedgerRepository::new(&tx).clear()?;
        SqliteAvailabilityRepository::new(&tx).clear()?;
        SqliteRosterRepository::new(&tx).clear()?;
        tx.commit()?;

        info!("event=clear_all module=roster status=ok");
        Ok(())
    }
}

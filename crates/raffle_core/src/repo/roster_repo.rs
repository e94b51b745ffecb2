//! Roster repository: the `participants` table.
//!
//! # Responsibility
//! - Persist participant -> mission pairs keyed by name.
//! - Serve the name list the draw engine computes eligibility from.
//!
//! # Invariants
//! - `name` is unique; inserting an existing name yields `DuplicateKey`.
//! - Listings are ordered by name ascending.

use crate::model::participant::Participant;
use crate::repo::{count_to_u64, map_insert_error, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for roster persistence.
pub trait RosterRepository {
    fn insert(&self, participant: &Participant) -> RepoResult<()>;
    /// Inserts unless the name exists. Returns whether a row was written.
    fn insert_if_absent(&self, participant: &Participant) -> RepoResult<bool>;
    fn delete(&self, name: &str) -> RepoResult<()>;
    fn update_mission(&self, name: &str, mission: &str) -> RepoResult<()>;
    fn get_mission(&self, name: &str) -> RepoResult<Option<String>>;
    fn list(&self) -> RepoResult<Vec<Participant>>;
    /// Names only, ordered by name.
    fn names(&self) -> RepoResult<Vec<String>>;
    fn count(&self) -> RepoResult<u64>;
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed roster repository.
pub struct SqliteRosterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRosterRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RosterRepository for SqliteRosterRepository<'_> {
    fn insert(&self, participant: &Participant) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO participants (name, mission) VALUES (?1, ?2);",
                params![participant.name, participant.mission],
            )
            .map_err(|err| map_insert_error(err, &participant.name))?;
        Ok(())
    }

    fn insert_if_absent(&self, participant: &Participant) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO participants (name, mission) VALUES (?1, ?2);",
            params![participant.name, participant.mission],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, name: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM participants WHERE name = ?1;", [name])?;
        if changed == 0 {
            return Err(RepoError::NotFound(name.to_string()));
        }
        Ok(())
    }

    fn update_mission(&self, name: &str, mission: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE participants SET mission = ?2 WHERE name = ?1;",
            params![name, mission],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(name.to_string()));
        }
        Ok(())
    }

    fn get_mission(&self, name: &str) -> RepoResult<Option<String>> {
        let mission = self
            .conn
            .query_row(
                "SELECT mission FROM participants WHERE name = ?1;",
                [name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(mission)
    }

    fn list(&self) -> RepoResult<Vec<Participant>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, mission FROM participants ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut participants = Vec::new();
        while let Some(row) = rows.next()? {
            participants.push(Participant {
                name: row.get("name")?,
                mission: row.get("mission")?,
            });
        }
        Ok(participants)
    }

    fn names(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM participants ORDER BY name ASC;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM participants;", [], |row| row.get(0))?;
        count_to_u64(count, "participants")
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM participants;", [])?;
        Ok(())
    }
}

//! Availability pool repository: the `available_names` table.
//!
//! # Responsibility
//! - Track which participants have not drawn yet.
//! - Mirror each pooled participant's mission for admin views.
//!
//! # Invariants
//! - Membership means "eligible to draw"; removal is the only way a
//!   participant leaves the pool short of a full clear.
//! - The mirrored mission is informational only; draws read missions from
//!   the roster.

use crate::model::participant::Participant;
use crate::repo::{count_to_u64, map_insert_error, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for the availability pool.
pub trait AvailabilityRepository {
    fn insert(&self, participant: &Participant) -> RepoResult<()>;
    /// Inserts unless the name is pooled. Returns whether a row was written.
    fn insert_if_absent(&self, participant: &Participant) -> RepoResult<bool>;
    fn is_available(&self, name: &str) -> RepoResult<bool>;
    /// Removes `name`. Returns whether it was pooled.
    fn remove(&self, name: &str) -> RepoResult<bool>;
    /// Updates the mirrored mission. Returns whether `name` was pooled.
    fn update_mission(&self, name: &str, mission: &str) -> RepoResult<bool>;
    fn list_names(&self) -> RepoResult<Vec<String>>;
    /// Replaces the whole pool with `roster`.
    fn repopulate_from(&self, roster: &[Participant]) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed availability pool.
pub struct SqliteAvailabilityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAvailabilityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AvailabilityRepository for SqliteAvailabilityRepository<'_> {
    fn insert(&self, participant: &Participant) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO available_names (name, mission) VALUES (?1, ?2);",
                params![participant.name, participant.mission],
            )
            .map_err(|err| map_insert_error(err, &participant.name))?;
        Ok(())
    }

    fn insert_if_absent(&self, participant: &Participant) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO available_names (name, mission) VALUES (?1, ?2);",
            params![participant.name, participant.mission],
        )?;
        Ok(changed > 0)
    }

    fn is_available(&self, name: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM available_names WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn remove(&self, name: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM available_names WHERE name = ?1;", [name])?;
        Ok(changed > 0)
    }

    fn update_mission(&self, name: &str, mission: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE available_names SET mission = ?2 WHERE name = ?1;",
            params![name, mission],
        )?;
        Ok(changed > 0)
    }

    fn list_names(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM available_names ORDER BY name ASC;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn repopulate_from(&self, roster: &[Participant]) -> RepoResult<()> {
        self.clear()?;
        let mut stmt = self
            .conn
            .prepare("INSERT INTO available_names (name, mission) VALUES (?1, ?2);")?;
        for participant in roster {
            stmt.execute(params![participant.name, participant.mission])
                .map_err(|err| map_insert_error(err, &participant.name))?;
        }
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM available_names;", [], |row| row.get(0))?;
        count_to_u64(count, "available_names")
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM available_names;", [])?;
        Ok(())
    }
}

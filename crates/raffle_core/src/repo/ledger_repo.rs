//! Draw ledger repository: the `draws` table.
//!
//! # Responsibility
//! - Append committed draws.
//! - Expose already-picked recipients for eligibility checks.
//!
//! # Invariants
//! - At most one row per drawer; a second `record` yields `DuplicateKey`.
//! - At most one row per recipient (unique index on `picked_name`).
//! - History is read newest first, ties broken by insertion order.

use crate::model::participant::DrawRecord;
use crate::repo::{count_to_u64, map_insert_error, RepoResult};
use rusqlite::{params, Connection};
use std::collections::BTreeSet;

/// Repository interface for the append-only draw ledger.
pub trait LedgerRepository {
    fn record(&self, participant: &str, picked_name: &str, mission: &str) -> RepoResult<()>;
    fn has_drawn(&self, participant: &str) -> RepoResult<bool>;
    fn list_draws(&self) -> RepoResult<Vec<DrawRecord>>;
    fn picked_names(&self) -> RepoResult<BTreeSet<String>>;
    fn count(&self) -> RepoResult<u64>;
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed draw ledger.
pub struct SqliteLedgerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLedgerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LedgerRepository for SqliteLedgerRepository<'_> {
    fn record(&self, participant: &str, picked_name: &str, mission: &str) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO draws (participant, picked_name, mission) VALUES (?1, ?2, ?3);",
                params![participant, picked_name, mission],
            )
            .map_err(|err| map_insert_error(err, participant))?;
        Ok(())
    }

    fn has_drawn(&self, participant: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM draws WHERE participant = ?1);",
            [participant],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_draws(&self) -> RepoResult<Vec<DrawRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT participant, picked_name, mission, drawn_at
             FROM draws
             ORDER BY drawn_at DESC, id DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut draws = Vec::new();
        while let Some(row) = rows.next()? {
            draws.push(DrawRecord {
                participant: row.get("participant")?,
                picked_name: row.get("picked_name")?,
                mission: row.get("mission")?,
                drawn_at: row.get("drawn_at")?,
            });
        }
        Ok(draws)
    }

    fn picked_names(&self) -> RepoResult<BTreeSet<String>> {
        let mut stmt = self.conn.prepare("SELECT picked_name FROM draws;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(names)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM draws;", [], |row| row.get(0))?;
        count_to_u64(count, "draws")
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM draws;", [])?;
        Ok(())
    }
}

//! Participant, draw and stats records.
//!
//! # Responsibility
//! - Define roster entries and committed draw records.
//! - Validate and normalize caller input before it reaches storage.
//!
//! # Invariants
//! - `name` and `mission` are stored trimmed and are never empty.
//! - `DrawRecord::participant != DrawRecord::picked_name`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Roster entry: one person taking part and the mission attached to them.
///
/// The mission is what whoever draws this person has to follow when
/// buying their gift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique key within the roster.
    pub name: String,
    /// Gift-buying instruction handed to this participant's drawer.
    pub mission: String,
}

impl Participant {
    /// Builds a participant from raw caller input.
    ///
    /// # Errors
    /// - `ValidationError::EmptyName` when `name` is blank after trimming.
    /// - `ValidationError::EmptyMission` when `mission` is blank after trimming.
    pub fn new(name: &str, mission: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_name(name)?,
            mission: normalize_mission(mission)?,
        })
    }
}

/// Committed ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRecord {
    /// Person who drew.
    pub participant: String,
    /// Person they have to buy a gift for.
    pub picked_name: String,
    /// Recipient's mission copied at draw time.
    pub mission: String,
    /// Commit time in epoch milliseconds.
    pub drawn_at: i64,
}

/// Result returned to the drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOutcome {
    pub participant: String,
    pub picked_name: String,
    pub mission: String,
}

/// Raffle progress counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleStats {
    /// Roster size.
    pub total: u64,
    /// Ledger size.
    pub drawn: u64,
    /// Availability pool size.
    pub remaining: u64,
}

/// Caller input rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    EmptyMission,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "participant name is required"),
            Self::EmptyMission => write!(f, "mission is required"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `name`, rejecting blank input.
pub fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Trims `mission`, rejecting blank input.
pub fn normalize_mission(mission: &str) -> Result<String, ValidationError> {
    let trimmed = mission.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyMission);
    }
    Ok(trimmed.to_string())
}

//! Domain model for the gift-exchange raffle.
//!
//! # Responsibility
//! - Define the records held by the roster, availability pool and ledger.
//! - Own input normalization rules shared by every write path.
//!
//! # Invariants
//! - A participant is identified by its trimmed, non-empty name.
//! - A draw record never names the drawer as its own recipient.

pub mod participant;

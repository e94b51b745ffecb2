//! HTTP surface for the gift-exchange raffle.
//!
//! # Responsibility
//! - Decode JSON requests into typed inputs and call `raffle_core`.
//! - Map raffle errors onto status codes without leaking storage detail.
//!
//! # Invariants
//! - Every store access runs on the blocking pool behind one connection lock.
//! - Handlers never hold the lock across an `.await`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;

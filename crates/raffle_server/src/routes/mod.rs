//! Route table.
//!
//! ## Routes
//!
//! - `GET    /health`
//! - `GET    /api/available-participants`
//! - `GET    /api/draws`
//! - `POST   /api/draw`
//! - `POST   /api/reset`
//! - `GET    /api/stats`
//! - `GET    /api/participants`
//! - `POST   /api/participants`
//! - `PUT    /api/participants/:name`
//! - `DELETE /api/participants/:name`
//! - `POST   /api/add-test-data`
//! - `POST   /api/clear-all`

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub mod draws;
pub mod participants;

/// Confirmation body for mutations without a richer payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Builds the full router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .merge(draws::routes())
                .merge(participants::routes()),
        )
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: raffle_core::core_version().to_string(),
    })
}

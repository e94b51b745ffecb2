//! Draw, reset, history and progress routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use raffle_core::{DrawOutcome, DrawRecord, DrawService, RaffleStats};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Body of `POST /draw`.
#[derive(Debug, Deserialize)]
pub struct DrawRequest {
    pub participant: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/available-participants", get(available_participants))
        .route("/draws", get(list_draws))
        .route("/draw", post(draw))
        .route("/reset", post(reset))
        .route("/stats", get(stats))
}

async fn available_participants(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let names = state
        .run(|conn| DrawService::new(conn).available_participants())
        .await?;
    Ok(Json(names))
}

async fn list_draws(State(state): State<AppState>) -> ApiResult<Json<Vec<DrawRecord>>> {
    let draws = state
        .run(|conn| DrawService::new(conn).list_draws())
        .await?;
    Ok(Json(draws))
}

async fn draw(
    State(state): State<AppState>,
    body: Result<Json<DrawRequest>, JsonRejection>,
) -> ApiResult<Json<DrawOutcome>> {
    let Json(request) = body?;
    let participant = request
        .participant
        .ok_or_else(|| ApiError::validation("participant is required"))?;

    let outcome = state
        .run(move |conn| DrawService::new(conn).draw(&participant))
        .await?;
    Ok(Json(outcome))
}

async fn reset(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    state.run(|conn| DrawService::new(conn).reset()).await?;
    Ok(MessageResponse::new("raffle reset"))
}

async fn stats(State(state): State<AppState>) -> ApiResult<Json<RaffleStats>> {
    let stats = state.run(|conn| DrawService::new(conn).stats()).await?;
    Ok(Json(stats))
}

//! Roster management routes, including test-data helpers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use raffle_core::{Participant, RosterService};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Body of `POST /participants`.
#[derive(Debug, Deserialize)]
pub struct AddParticipantRequest {
    pub name: Option<String>,
    pub mission: Option<String>,
}

/// Body of `PUT /participants/:name`.
#[derive(Debug, Deserialize)]
pub struct UpdateMissionRequest {
    pub mission: Option<String>,
}

/// Confirmation echoing the stored participant.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantAddedResponse {
    pub message: String,
    pub name: String,
    pub mission: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/participants",
            get(list_participants).post(add_participant),
        )
        .route(
            "/participants/:name",
            put(update_mission).delete(remove_participant),
        )
        .route("/add-test-data", post(add_test_data))
        .route("/clear-all", post(clear_all))
}

async fn list_participants(State(state): State<AppState>) -> ApiResult<Json<Vec<Participant>>> {
    let participants = state
        .run(|conn| RosterService::new(conn).list_participants())
        .await?;
    Ok(Json(participants))
}

async fn add_participant(
    State(state): State<AppState>,
    body: Result<Json<AddParticipantRequest>, JsonRejection>,
) -> ApiResult<Json<ParticipantAddedResponse>> {
    let Json(request) = body?;
    let (Some(name), Some(mission)) = (request.name, request.mission) else {
        return Err(ApiError::validation("name and mission are required"));
    };

    let participant = state
        .run(move |conn| RosterService::new(conn).add_participant(&name, &mission))
        .await?;
    Ok(Json(ParticipantAddedResponse {
        message: "participant added".to_string(),
        name: participant.name,
        mission: participant.mission,
    }))
}

async fn update_mission(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<UpdateMissionRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = body?;
    let mission = request
        .mission
        .ok_or_else(|| ApiError::validation("mission is required"))?;

    state
        .run(move |conn| RosterService::new(conn).update_mission(&name, &mission))
        .await?;
    Ok(MessageResponse::new("participant updated"))
}

async fn remove_participant(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .run(move |conn| RosterService::new(conn).remove_participant(&name))
        .await?;
    Ok(MessageResponse::new("participant removed"))
}

async fn add_test_data(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    let inserted = state
        .run(|conn| RosterService::new(conn).seed_test_participants())
        .await?;
    Ok(MessageResponse::new(format!(
        "{inserted} test participants added"
    )))
}

async fn clear_all(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    state.run(|conn| RosterService::new(conn).clear_all()).await?;
    Ok(MessageResponse::new("all raffle data cleared"))
}

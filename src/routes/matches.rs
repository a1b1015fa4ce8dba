use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        admin::ActionResponse,
        matches::{CreateMatchRequest, MatchSummary, UpdateMatchRequest, VoteRequest},
    },
    error::AppError,
    services::{admin_service, match_service, vote_service},
    state::SharedState,
};

/// Routes handling the match collection and votes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches", get(list_matches).post(create_match))
        .route("/matches/{id}", axum::routing::patch(update_match).delete(delete_match))
        .route("/matches/{id}/vote", post(cast_vote))
}

/// All matches, sorted by (date, time).
#[utoipa::path(
    get,
    path = "/matches",
    tag = "matches",
    responses(
        (status = 200, description = "Ordered match list", body = Vec<MatchSummary>)
    )
)]
pub async fn list_matches(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    let matches = match_service::list_matches(&state).await?;
    Ok(Json(matches))
}

/// Create a match (admin only).
#[utoipa::path(
    post,
    path = "/matches",
    tag = "matches",
    request_body = CreateMatchRequest,
    responses(
        (status = 200, description = "Match created", body = MatchSummary),
        (status = 401, description = "Missing or invalid admin session")
    )
)]
pub async fn create_match(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<CreateMatchRequest>,
) -> Result<Json<MatchSummary>, AppError> {
    admin_service::authorize(&state, &headers)?;
    payload.validate()?;
    let summary = match_service::create_match(&state, payload).await?;
    Ok(Json(summary))
}

/// Apply a partial update to a match (admin only).
#[utoipa::path(
    patch,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = Uuid, Path, description = "Identifier of the match to update")),
    request_body = UpdateMatchRequest,
    responses(
        (status = 200, description = "Merged match", body = MatchSummary),
        (status = 404, description = "Unknown match id")
    )
)]
pub async fn update_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<UpdateMatchRequest>,
) -> Result<Json<MatchSummary>, AppError> {
    admin_service::authorize(&state, &headers)?;
    payload.validate()?;
    let summary = match_service::update_match(&state, id, payload).await?;
    Ok(Json(summary))
}

/// Delete a match (admin only).
#[utoipa::path(
    delete,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = Uuid, Path, description = "Identifier of the match to delete")),
    responses(
        (status = 200, description = "Match deleted", body = ActionResponse),
        (status = 404, description = "Unknown match id")
    )
)]
pub async fn delete_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ActionResponse>, AppError> {
    admin_service::authorize(&state, &headers)?;
    match_service::delete_match(&state, id).await?;
    Ok(Json(ActionResponse::ok()))
}

/// Cast a prediction vote for one side of an upcoming match.
#[utoipa::path(
    post,
    path = "/matches/{id}/vote",
    tag = "matches",
    params(("id" = Uuid, Path, description = "Identifier of the match to vote on")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated match", body = MatchSummary),
        (status = 404, description = "Unknown match id"),
        (status = 409, description = "Match is no longer upcoming")
    )
)]
pub async fn cast_vote(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<MatchSummary>, AppError> {
    let summary = vote_service::cast_vote(&state, id, payload.team).await?;
    Ok(Json(summary))
}

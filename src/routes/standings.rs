use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    dao::models::{Gender, MatchStatus},
    dto::standings::{ScheduleGroup, StandingsRow},
    error::AppError,
    services::match_service,
    state::SharedState,
};

/// Routes serving the derived read views.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/standings", get(standings))
        .route("/schedule", get(schedule))
}

/// Medal standings over all finished finals.
#[utoipa::path(
    get,
    path = "/standings",
    tag = "standings",
    responses(
        (status = 200, description = "Medal table, best entities first", body = Vec<StandingsRow>)
    )
)]
pub async fn standings(
    State(state): State<SharedState>,
) -> Result<Json<Vec<StandingsRow>>, AppError> {
    let rows = match_service::medal_standings(&state).await?;
    Ok(Json(rows))
}

/// Optional schedule filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ScheduleQuery {
    /// Only include matches with this status.
    pub status: Option<MatchStatus>,
    /// Only include matches in this gender bracket.
    pub gender: Option<Gender>,
}

/// Matches grouped by day label, sections in label string order.
#[utoipa::path(
    get,
    path = "/schedule",
    tag = "standings",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Date-grouped schedule", body = Vec<ScheduleGroup>)
    )
)]
pub async fn schedule(
    State(state): State<SharedState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ScheduleGroup>>, AppError> {
    let groups = match_service::schedule(&state, |record| {
        query.status.is_none_or(|status| record.status == status)
            && query.gender.is_none_or(|gender| record.gender == gender)
    })
    .await?;
    Ok(Json(groups))
}

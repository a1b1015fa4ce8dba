//! Business logic behind the match REST routes: validation that needs the
//! stored record, store calls, and post-commit event broadcasts.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, MatchPatch, NewMatch},
    dto::{
        matches::{CreateMatchRequest, MatchSummary, UpdateMatchRequest},
        standings::{ScheduleGroup, StandingsRow},
    },
    error::ServiceError,
    services::{aggregation, sse_events},
    state::SharedState,
};

/// All matches in (date, time) order.
pub async fn list_matches(state: &SharedState) -> Result<Vec<MatchSummary>, ServiceError> {
    let store = state.require_match_store().await?;
    let matches = store.list_matches().await?;
    Ok(matches.into_iter().map(Into::into).collect())
}

/// Create a match and announce it to every viewer.
pub async fn create_match(
    state: &SharedState,
    request: CreateMatchRequest,
) -> Result<MatchSummary, ServiceError> {
    let fields: NewMatch = request.into();
    ensure_winner_is_a_team(
        fields.winner.as_deref(),
        &fields.team_a.name,
        &fields.team_b.name,
    )?;

    let store = state.require_match_store().await?;
    let created = store.create_match(fields).await?;
    debug!(id = %created.id, sport = %created.sport_name, "match created");

    let summary: MatchSummary = created.into();
    sse_events::broadcast_match_created(state, &summary);
    Ok(summary)
}

/// Shallow-merge a partial update into a match and announce the result.
pub async fn update_match(
    state: &SharedState,
    id: Uuid,
    request: UpdateMatchRequest,
) -> Result<MatchSummary, ServiceError> {
    let store = state.require_match_store().await?;
    let current = store
        .find_match(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("match `{id}`")))?;

    let patch: MatchPatch = request.into();
    check_patch(&current, &patch)?;

    let updated = store.update_match(id, patch).await?;
    let summary: MatchSummary = updated.into();
    sse_events::broadcast_match_updated(state, &summary);
    Ok(summary)
}

/// Delete a match and announce the removal.
pub async fn delete_match(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_match_store().await?;
    store.delete_match(id).await?;
    debug!(%id, "match deleted");
    sse_events::broadcast_match_deleted(state, id);
    Ok(())
}

/// Medal standings derived from the full current match list and the
/// configured alias table.
pub async fn medal_standings(state: &SharedState) -> Result<Vec<StandingsRow>, ServiceError> {
    let store = state.require_match_store().await?;
    let matches = store.list_matches().await?;
    Ok(aggregation::medal_standings(
        &matches,
        state.config().aliases(),
    ))
}

/// Date-grouped schedule view over matches passing the given filter.
pub async fn schedule(
    state: &SharedState,
    filter: impl Fn(&MatchEntity) -> bool,
) -> Result<Vec<ScheduleGroup>, ServiceError> {
    let store = state.require_match_store().await?;
    let matches: Vec<MatchEntity> = store
        .list_matches()
        .await?
        .into_iter()
        .filter(|record| filter(record))
        .collect();

    Ok(aggregation::group_by_date(matches)
        .into_iter()
        .map(|(date, records)| ScheduleGroup {
            date,
            matches: records.into_iter().map(Into::into).collect(),
        })
        .collect())
}

/// Validate a patch against the current record before the merge commits.
fn check_patch(current: &MatchEntity, patch: &MatchPatch) -> Result<(), ServiceError> {
    // status moving backward is tolerated (admins fix mistakes) but logged
    if let Some(next) = patch.status {
        if next.rank() < current.status.rank() {
            warn!(
                id = %current.id,
                from = ?current.status,
                to = ?next,
                "backward status transition"
            );
        }
    }

    let team_a = patch
        .team_a
        .as_ref()
        .map_or(current.team_a.name.as_str(), |side| side.name.as_str());
    let team_b = patch
        .team_b
        .as_ref()
        .map_or(current.team_b.name.as_str(), |side| side.name.as_str());
    let winner = patch
        .winner
        .as_deref()
        .or(current.winner.as_deref())
        .filter(|_| patch.winner.is_some() || patch.team_a.is_some() || patch.team_b.is_some());

    ensure_winner_is_a_team(winner, team_a, team_b)
}

fn ensure_winner_is_a_team(
    winner: Option<&str>,
    team_a: &str,
    team_b: &str,
) -> Result<(), ServiceError> {
    match winner {
        Some(name) if name != team_a && name != team_b => Err(ServiceError::InvalidInput(
            format!("winner `{name}` is neither `{team_a}` nor `{team_b}`"),
        )),
        _ => Ok(()),
    }
}

//! Vote casting: status gating, the field-scoped counter increment, and the
//! post-commit broadcast.

use tracing::debug;
use uuid::Uuid;

use crate::{
    dao::models::{MatchStatus, VoteSide},
    dto::matches::MatchSummary,
    error::ServiceError,
    services::sse_events,
    state::SharedState,
};

/// Increment one side's prediction counter.
///
/// Votes are only accepted while the match is still upcoming; afterwards
/// the request is rejected as a state conflict. One-vote-per-viewer is a
/// client-side concern (see [`crate::sync::VoteLedger`]); the server does
/// not track voter identity.
pub async fn cast_vote(
    state: &SharedState,
    id: Uuid,
    side: VoteSide,
) -> Result<MatchSummary, ServiceError> {
    let store = state.require_match_store().await?;
    let current = store
        .find_match(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("match `{id}`")))?;

    if current.status != MatchStatus::Upcoming {
        return Err(ServiceError::InvalidState(format!(
            "votes are only accepted on upcoming matches (match is {:?})",
            current.status
        )));
    }

    let updated = store.increment_vote(id, side).await?;
    debug!(%id, ?side, "vote recorded");

    let summary: MatchSummary = updated.into();
    sse_events::broadcast_match_updated(state, &summary);
    Ok(summary)
}

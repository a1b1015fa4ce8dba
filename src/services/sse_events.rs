//! Typed realtime events pushed to every connected viewer after a store
//! mutation commits. Broadcasting never blocks the mutating request and
//! delivery failures are only logged; clients recover via a full refetch.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::{
        matches::MatchSummary,
        sse::{MatchDeletedEvent, ServerEvent, SystemStatus},
    },
    state::SharedState,
};

const EVENT_MATCH_CREATED: &str = "match.created";
const EVENT_MATCH_UPDATED: &str = "match.updated";
const EVENT_MATCH_DELETED: &str = "match.deleted";
const EVENT_SYSTEM_STATUS: &str = "system.status";

/// Broadcast a newly created match to all viewers.
pub fn broadcast_match_created(state: &SharedState, summary: &MatchSummary) {
    send_event(state, EVENT_MATCH_CREATED, summary);
}

/// Broadcast the full replacement state of an updated match.
pub fn broadcast_match_updated(state: &SharedState, summary: &MatchSummary) {
    send_event(state, EVENT_MATCH_UPDATED, summary);
}

/// Broadcast the id of a deleted match.
pub fn broadcast_match_deleted(state: &SharedState, id: Uuid) {
    send_event(state, EVENT_MATCH_DELETED, &MatchDeletedEvent { id });
}

/// Broadcast a degraded-mode toggle.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    send_event(state, EVENT_SYSTEM_STATUS, &SystemStatus { degraded });
}

fn send_event<T: Serialize>(state: &SharedState, event: &str, payload: &T) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(server_event) => state.events().broadcast(server_event),
        Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
    }
}

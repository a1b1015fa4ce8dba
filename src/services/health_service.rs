use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Current health of the backend. Always answers 200; the payload says
/// whether storage is reachable. A failing store ping is logged but the
/// degraded flag itself is owned by the storage supervisor.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.match_store().await {
        Some(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "storage ping failed during healthcheck");
            }
        }
        None => warn!("healthcheck while no storage backend is installed"),
    }

    if state.is_degraded() {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}

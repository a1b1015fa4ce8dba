use axum::Router;

use crate::state::SharedState;

/// Admin login route.
pub mod admin;
/// Swagger UI routes.
pub mod docs;
/// Health probe route.
pub mod health;
/// Match CRUD and vote routes.
pub mod matches;
/// Realtime event stream route.
pub mod sse;
/// Standings and schedule routes.
pub mod standings;

/// Compose all route trees and attach the shared state.
pub fn router(state: SharedState) -> Router<()> {
    Router::new()
        .merge(health::router())
        .merge(sse::router())
        .merge(matches::router())
        .merge(standings::router())
        .merge(admin::router())
        .merge(docs::router())
        .with_state(state)
}

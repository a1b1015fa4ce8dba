use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::admin::{LoginRequest, LoginResponse},
    error::AppError,
    services::admin_service,
    state::SharedState,
};

/// Routes handling admin authentication.
pub fn router() -> Router<SharedState> {
    Router::new().route("/admin/login", post(login))
}

/// Exchange the shared admin secret for a session token.
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login accepted", body = LoginResponse),
        (status = 401, description = "Invalid password")
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = admin_service::login(&state, &payload.password)?;
    Ok(Json(response))
}

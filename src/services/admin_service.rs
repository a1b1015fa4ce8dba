//! Admin authentication: a single shared secret exchanged for an opaque
//! session token, and bearer verification for mutating routes.

use axum::http::{HeaderMap, header::AUTHORIZATION};
use tracing::warn;
use uuid::Uuid;

use crate::{dto::admin::LoginResponse, error::ServiceError, state::SharedState};

/// Compare the presented secret against the configured admin password and
/// mint a session token on success. Tokens live until the server restarts.
pub fn login(state: &SharedState, password: &str) -> Result<LoginResponse, ServiceError> {
    let Some(expected) = state.admin_password() else {
        warn!("admin login attempted but no admin password is configured");
        return Err(ServiceError::Unauthorized(
            "admin access is not configured".into(),
        ));
    };

    if password != expected {
        return Err(ServiceError::Unauthorized("invalid password".into()));
    }

    let token = Uuid::new_v4().simple().to_string();
    state.admin_sessions().insert(token.clone());
    Ok(LoginResponse {
        success: true,
        token,
    })
}

/// Verify the `Authorization: Bearer` header against the session set.
pub fn authorize(state: &SharedState, headers: &HeaderMap) -> Result<(), ServiceError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ServiceError::Unauthorized("missing bearer token".into()))?;

    if state.admin_sessions().contains(token) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized("invalid session token".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[test]
    fn login_rejects_wrong_password_and_accepts_right_one() {
        let state = AppState::new(AppConfig::default(), Some("arena".into()));

        assert!(login(&state, "wrong").is_err());
        let response = login(&state, "arena").unwrap();
        assert!(response.success);
        assert!(state.admin_sessions().contains(&response.token));
    }

    #[test]
    fn login_fails_when_no_password_configured() {
        let state = AppState::new(AppConfig::default(), None);
        assert!(matches!(
            login(&state, "anything"),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn authorize_checks_the_bearer_token() {
        let state = AppState::new(AppConfig::default(), Some("arena".into()));
        let token = login(&state, "arena").unwrap().token;

        let mut headers = HeaderMap::new();
        assert!(authorize(&state, &headers).is_err());

        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        assert!(authorize(&state, &headers).is_ok());

        headers.insert(AUTHORIZATION, "Bearer bogus".parse().unwrap());
        assert!(authorize(&state, &headers).is_err());
    }
}

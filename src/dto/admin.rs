use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Credentials presented by the admin UI: a single shared secret.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// The shared admin secret.
    pub password: String,
}

/// Successful login response carrying the opaque session token the admin
/// UI must present on mutating requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Always `true` on a 200 response.
    pub success: bool,
    /// Opaque bearer token; valid until the server restarts.
    pub token: String,
}

/// Generic acknowledgement for operations without a richer payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    /// Whether the operation completed.
    pub success: bool,
}

impl ActionResponse {
    /// Acknowledge a completed operation.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

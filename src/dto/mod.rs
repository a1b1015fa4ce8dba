use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Admin login payloads.
pub mod admin;
/// Health endpoint payloads.
pub mod health;
/// Match CRUD and vote payloads.
pub mod matches;
/// SSE frame and event payloads.
pub mod sse;
/// Standings and schedule payloads.
pub mod standings;
/// Shared field validators.
pub mod validation;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

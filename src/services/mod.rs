/// Admin authentication and session tokens.
pub mod admin_service;
/// Pure standings/vote/schedule aggregation.
pub mod aggregation;
/// OpenAPI document aggregation.
pub mod documentation;
/// Health status reporting.
pub mod health_service;
/// Match CRUD orchestration.
pub mod match_service;
/// SSE event payload builders and emitters.
pub mod sse_events;
/// SSE subscription plumbing.
pub mod sse_service;
/// Storage connection supervision.
pub mod storage_supervisor;
/// Vote casting.
pub mod vote_service;

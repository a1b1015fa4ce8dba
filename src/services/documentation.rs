use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Flavium Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::match_stream,
        crate::routes::admin::login,
        crate::routes::matches::list_matches,
        crate::routes::matches::create_match,
        crate::routes::matches::update_match,
        crate::routes::matches::delete_match,
        crate::routes::matches::cast_vote,
        crate::routes::standings::standings,
        crate::routes::standings::schedule,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::admin::LoginRequest,
            crate::dto::admin::LoginResponse,
            crate::dto::admin::ActionResponse,
            crate::dto::matches::CreateMatchRequest,
            crate::dto::matches::UpdateMatchRequest,
            crate::dto::matches::VoteRequest,
            crate::dto::matches::MatchSummary,
            crate::dto::standings::StandingsRow,
            crate::dto::standings::ScheduleGroup,
            crate::dto::sse::MatchDeletedEvent,
            crate::dto::sse::SystemStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent match event stream"),
        (name = "admin", description = "Admin authentication"),
        (name = "matches", description = "Match collection and votes"),
        (name = "standings", description = "Derived standings and schedule views"),
    )
)]
pub struct ApiDoc;

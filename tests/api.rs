//! Service-level integration tests running against the in-memory store.

use std::sync::Arc;

use flavium_back::{
    config::{AliasTable, AppConfig},
    dao::{
        match_store::memory::MemoryMatchStore,
        models::{Category, Gender, MatchStatus, MedalRound, VoteSide},
    },
    dto::{
        matches::{CreateMatchRequest, TeamSide, UpdateMatchRequest},
        sse::{MatchDeletedEvent, ServerEvent},
    },
    error::ServiceError,
    services::{match_service, vote_service},
    state::{AppState, SharedState},
    sync::{MatchEvent, MatchMirror},
};

async fn state_with_memory_store() -> SharedState {
    let state = AppState::new(AppConfig::default(), Some("secret".into()));
    state
        .set_match_store(Arc::new(MemoryMatchStore::new()))
        .await;
    state
}

fn match_request(sport: &str, team_a: &str, team_b: &str) -> CreateMatchRequest {
    CreateMatchRequest {
        sport_name: sport.into(),
        category: Category::Team,
        gender: Gender::Boys,
        date: "2026-01-24".into(),
        time: "10:00".into(),
        venue: "Court 1".into(),
        round_name: "Group Stage".into(),
        team_a: TeamSide {
            name: team_a.into(),
            score: 0,
        },
        team_b: TeamSide {
            name: team_b.into(),
            score: 0,
        },
        status: MatchStatus::Upcoming,
        winner: None,
        medal_round: MedalRound::None,
    }
}

fn finish_with_winner(winner: &str) -> UpdateMatchRequest {
    UpdateMatchRequest {
        status: Some(MatchStatus::Finished),
        winner: Some(winner.into()),
        ..Default::default()
    }
}

/// Decode a broadcast frame into the event the dashboard mirror consumes.
fn decode(event: &ServerEvent) -> Option<MatchEvent> {
    match event.event.as_deref() {
        Some("match.created") | Some("match.updated") => {
            Some(MatchEvent::Upsert(serde_json::from_str(&event.data).ok()?))
        }
        Some("match.deleted") => {
            let deleted: MatchDeletedEvent = serde_json::from_str(&event.data).ok()?;
            Some(MatchEvent::Deleted { id: deleted.id })
        }
        _ => None,
    }
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let state = state_with_memory_store().await;

    let created = match_service::create_match(&state, match_request("Football", "TY CS", "SY IT"))
        .await
        .unwrap();
    assert_eq!(created.votes.team_a, 0);
    assert_eq!(created.votes.team_b, 0);
    assert_eq!(created.status, MatchStatus::Upcoming);
    assert!(!created.created_at.is_empty());

    let listed = match_service::list_matches(&state).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].sport_name, "Football");
    assert_eq!(listed[0].team_a.name, "TY CS");
}

#[tokio::test]
async fn list_orders_by_date_then_time() {
    let state = state_with_memory_store().await;

    let mut late = match_request("Chess", "A", "B");
    late.date = "2026-01-25".into();
    let mut early = match_request("Chess", "C", "D");
    early.date = "2026-01-24".into();
    early.time = "09:00".into();

    let late_id = match_service::create_match(&state, late).await.unwrap().id;
    let early_id = match_service::create_match(&state, early).await.unwrap().id;

    let listed = match_service::list_matches(&state).await.unwrap();
    assert_eq!(listed[0].id, early_id);
    assert_eq!(listed[1].id, late_id);
}

#[tokio::test]
async fn delete_unknown_match_is_not_found() {
    let state = state_with_memory_store().await;
    let err = match_service::delete_match(&state, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn update_unknown_match_is_not_found() {
    let state = state_with_memory_store().await;
    let err = match_service::update_match(
        &state,
        uuid::Uuid::new_v4(),
        UpdateMatchRequest {
            venue: Some("Court 2".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn winner_must_be_one_of_the_teams() {
    let state = state_with_memory_store().await;
    let created = match_service::create_match(&state, match_request("Badminton", "TY CS", "SY IT"))
        .await
        .unwrap();

    let err = match_service::update_match(&state, created.id, finish_with_winner("LY MBA TECH"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn vote_increments_one_side_and_broadcasts() {
    let state = state_with_memory_store().await;
    let created = match_service::create_match(&state, match_request("Cricket", "TY CS", "SY IT"))
        .await
        .unwrap();

    let mut events = state.events().subscribe();
    let updated = vote_service::cast_vote(&state, created.id, VoteSide::TeamA)
        .await
        .unwrap();
    assert_eq!(updated.votes.team_a, 1);
    assert_eq!(updated.votes.team_b, 0);

    let frame = events.recv().await.unwrap();
    assert_eq!(frame.event.as_deref(), Some("match.updated"));
    let Some(MatchEvent::Upsert(summary)) = decode(&frame) else {
        panic!("expected an upsert event");
    };
    assert_eq!(summary.id, created.id);
    assert_eq!(summary.votes.team_a, 1);
}

#[tokio::test]
async fn vote_rejected_once_match_left_upcoming() {
    let state = state_with_memory_store().await;
    let created = match_service::create_match(&state, match_request("Kabaddi", "TY CS", "SY IT"))
        .await
        .unwrap();
    match_service::update_match(&state, created.id, finish_with_winner("TY CS"))
        .await
        .unwrap();

    let err = vote_service::cast_vote(&state, created.id, VoteSide::TeamB)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));

    // the rejected vote must not leak into the tally
    let listed = match_service::list_matches(&state).await.unwrap();
    assert_eq!(listed[0].votes.team_b, 0);
}

#[tokio::test]
async fn degraded_state_rejects_reads() {
    let state = AppState::new(AppConfig::default(), None);
    let err = match_service::list_matches(&state).await.unwrap_err();
    assert!(matches!(err, ServiceError::Degraded));
    assert!(state.is_degraded());
}

#[tokio::test]
async fn standings_from_a_finished_final() {
    let state = state_with_memory_store().await;

    let mut request = match_request("Volleyball", "SY IT", "TY CS");
    request.medal_round = MedalRound::Final;
    let created = match_service::create_match(&state, request).await.unwrap();
    match_service::update_match(&state, created.id, finish_with_winner("TY CS"))
        .await
        .unwrap();

    // a non-final finish must not award anything
    let other = match_service::create_match(&state, match_request("Volleyball", "FY CE", "SY CE"))
        .await
        .unwrap();
    match_service::update_match(&state, other.id, finish_with_winner("FY CE"))
        .await
        .unwrap();

    let rows = match_service::medal_standings(&state).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].entity, "TY CS");
    assert_eq!((rows[0].gold, rows[0].silver), (1, 0));
    assert_eq!(rows[1].entity, "SY IT");
    assert_eq!((rows[1].gold, rows[1].silver), (0, 1));
}

#[tokio::test]
async fn standings_fan_out_follows_the_alias_table() {
    let aliases = AliasTable::from_iter([("TY GIRLS", vec!["TY CS", "TY IT"])]);
    let state = AppState::new(AppConfig::with_aliases(aliases), None);
    state
        .set_match_store(Arc::new(MemoryMatchStore::new()))
        .await;

    let mut request = match_request("Throwball", "TY GIRLS", "SY IT");
    request.gender = Gender::Girls;
    request.medal_round = MedalRound::Final;
    let created = match_service::create_match(&state, request).await.unwrap();
    match_service::update_match(&state, created.id, finish_with_winner("TY GIRLS"))
        .await
        .unwrap();

    let rows = match_service::medal_standings(&state).await.unwrap();
    let entities: Vec<&str> = rows.iter().map(|row| row.entity.as_str()).collect();
    assert_eq!(entities, ["TY CS", "TY IT", "SY IT"]);
    assert!(rows[..2].iter().all(|row| row.gold == 1 && row.silver == 0));
    assert_eq!((rows[2].gold, rows[2].silver), (0, 1));
}

#[tokio::test]
async fn schedule_groups_and_filters() {
    let state = state_with_memory_store().await;

    let mut day_one = match_request("Chess", "A", "B");
    day_one.date = "2026-01-24".into();
    let mut day_two = match_request("Chess", "C", "D");
    day_two.date = "2026-01-25".into();
    day_two.gender = Gender::Girls;

    match_service::create_match(&state, day_one).await.unwrap();
    match_service::create_match(&state, day_two).await.unwrap();

    let all = match_service::schedule(&state, |_| true).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].date, "2026-01-24");
    assert_eq!(all[1].date, "2026-01-25");

    let girls = match_service::schedule(&state, |record| record.gender == Gender::Girls)
        .await
        .unwrap();
    assert_eq!(girls.len(), 1);
    assert_eq!(girls[0].date, "2026-01-25");
}

#[tokio::test]
async fn mirror_tracks_the_event_stream() {
    let state = state_with_memory_store().await;
    let mut events = state.events().subscribe();
    let mut mirror = MatchMirror::new();

    let first = match_service::create_match(&state, match_request("Football", "A", "B"))
        .await
        .unwrap();
    let second = match_service::create_match(&state, match_request("Hockey", "C", "D"))
        .await
        .unwrap();
    match_service::update_match(
        &state,
        first.id,
        UpdateMatchRequest {
            status: Some(MatchStatus::Live),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    match_service::delete_match(&state, second.id).await.unwrap();

    for _ in 0..4 {
        let frame = events.recv().await.unwrap();
        if let Some(event) = decode(&frame) {
            mirror.apply(event);
        }
    }

    let matches = mirror.matches();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, first.id);
    assert_eq!(matches[0].status, MatchStatus::Live);
}

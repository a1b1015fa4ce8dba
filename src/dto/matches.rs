//! Request and response payloads for the match CRUD and vote endpoints.
//! Wire field names are camelCase to match the dashboard frontend.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{
        Category, Gender, MatchEntity, MatchPatch, MatchStatus, MedalRound, NewMatch,
        TeamSideEntity, VoteSide, VoteTallyEntity,
    },
    dto::{format_system_time, validation::validate_nonblank},
};

/// One side of a match on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct TeamSide {
    /// Free-text team name.
    #[validate(custom(function = validate_nonblank))]
    pub name: String,
    /// Current score; defaults to zero on input.
    #[serde(default)]
    pub score: u32,
}

impl From<TeamSide> for TeamSideEntity {
    fn from(value: TeamSide) -> Self {
        Self {
            name: value.name,
            score: value.score,
        }
    }
}

impl From<TeamSideEntity> for TeamSide {
    fn from(value: TeamSideEntity) -> Self {
        Self {
            name: value.name,
            score: value.score,
        }
    }
}

/// Vote tally on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    /// Votes for team A.
    pub team_a: u32,
    /// Votes for team B.
    pub team_b: u32,
}

impl From<VoteTallyEntity> for VoteTally {
    fn from(value: VoteTallyEntity) -> Self {
        Self {
            team_a: value.team_a,
            team_b: value.team_b,
        }
    }
}

impl From<VoteTally> for VoteTallyEntity {
    fn from(value: VoteTally) -> Self {
        Self {
            team_a: value.team_a,
            team_b: value.team_b,
        }
    }
}

/// Payload accepted when the admin creates a match. The id and the vote
/// tally are always server-assigned.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    /// Name of the sport.
    #[validate(custom(function = validate_nonblank))]
    pub sport_name: String,
    /// Sport category.
    pub category: Category,
    /// Gender bracket.
    pub gender: Gender,
    /// Opaque day label used for grouping.
    #[validate(custom(function = validate_nonblank))]
    pub date: String,
    /// Free-text start time.
    #[serde(default)]
    pub time: String,
    /// Venue label.
    #[serde(default)]
    pub venue: String,
    /// Stage label such as "Semi Final".
    #[serde(default)]
    pub round_name: String,
    /// First team.
    #[validate(nested)]
    pub team_a: TeamSide,
    /// Second team.
    #[validate(nested)]
    pub team_b: TeamSide,
    /// Initial status; defaults to Upcoming.
    #[serde(default)]
    pub status: MatchStatus,
    /// Winning team name; rarely set at creation.
    #[serde(default)]
    pub winner: Option<String>,
    /// Medal eligibility flag; defaults to None.
    #[serde(default)]
    pub medal_round: MedalRound,
}

impl From<CreateMatchRequest> for NewMatch {
    fn from(value: CreateMatchRequest) -> Self {
        Self {
            sport_name: value.sport_name,
            category: value.category,
            gender: value.gender,
            date: value.date,
            time: value.time,
            venue: value.venue,
            round_name: value.round_name,
            team_a: value.team_a.into(),
            team_b: value.team_b.into(),
            status: value.status,
            winner: value.winner,
            medal_round: value.medal_round,
        }
    }
}

/// Partial update sent by the admin. Only present fields change; team
/// structs must be sent whole (`{name, score}`) or the omitted half is
/// clobbered by the shallow merge.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchRequest {
    /// New sport name.
    #[serde(default)]
    pub sport_name: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<Category>,
    /// New gender bracket.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// New day label.
    #[serde(default)]
    pub date: Option<String>,
    /// New start time.
    #[serde(default)]
    pub time: Option<String>,
    /// New venue.
    #[serde(default)]
    pub venue: Option<String>,
    /// New stage label.
    #[serde(default)]
    pub round_name: Option<String>,
    /// Full replacement for team A.
    #[serde(default)]
    pub team_a: Option<TeamSide>,
    /// Full replacement for team B.
    #[serde(default)]
    pub team_b: Option<TeamSide>,
    /// New status.
    #[serde(default)]
    pub status: Option<MatchStatus>,
    /// Winning team name; must match one of the team names.
    #[serde(default)]
    pub winner: Option<String>,
    /// New medal eligibility flag.
    #[serde(default)]
    pub medal_round: Option<MedalRound>,
}

impl Validate for UpdateMatchRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(name) = &self.sport_name {
            if let Err(err) = validate_nonblank(name) {
                errors.add("sportName", err);
            }
        }
        if let Some(date) = &self.date {
            if let Err(err) = validate_nonblank(date) {
                errors.add("date", err);
            }
        }
        for (field, side) in [("teamA", &self.team_a), ("teamB", &self.team_b)] {
            if let Some(side) = side {
                if let Err(err) = validate_nonblank(&side.name) {
                    errors.add(field, err);
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<UpdateMatchRequest> for MatchPatch {
    fn from(value: UpdateMatchRequest) -> Self {
        Self {
            sport_name: value.sport_name,
            category: value.category,
            gender: value.gender,
            date: value.date,
            time: value.time,
            venue: value.venue,
            round_name: value.round_name,
            team_a: value.team_a.map(Into::into),
            team_b: value.team_b.map(Into::into),
            status: value.status,
            winner: value.winner,
            medal_round: value.medal_round,
        }
    }
}

/// Body of a vote request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VoteRequest {
    /// Which side the viewer predicts will win.
    pub team: VoteSide,
}

/// Full match representation returned by every read and mutation endpoint
/// and carried by the realtime events.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Name of the sport.
    pub sport_name: String,
    /// Sport category.
    pub category: Category,
    /// Gender bracket.
    pub gender: Gender,
    /// Opaque day label.
    pub date: String,
    /// Free-text start time.
    pub time: String,
    /// Venue label.
    pub venue: String,
    /// Stage label.
    pub round_name: String,
    /// First team.
    pub team_a: TeamSide,
    /// Second team.
    pub team_b: TeamSide,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Winning team name, if decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Medal eligibility flag.
    pub medal_round: MedalRound,
    /// Prediction tally.
    pub votes: VoteTally,
    /// RFC3339 creation timestamp.
    pub created_at: String,
    /// RFC3339 timestamp of the last change.
    pub updated_at: String,
}

impl From<MatchEntity> for MatchSummary {
    fn from(value: MatchEntity) -> Self {
        Self {
            id: value.id,
            sport_name: value.sport_name,
            category: value.category,
            gender: value.gender,
            date: value.date,
            time: value.time,
            venue: value.venue,
            round_name: value.round_name,
            team_a: value.team_a.into(),
            team_b: value.team_b.into(),
            status: value.status,
            winner: value.winner,
            medal_round: value.medal_round,
            votes: value.votes.into(),
            created_at: format_system_time(value.created_at),
            updated_at: format_system_time(value.updated_at),
        }
    }
}

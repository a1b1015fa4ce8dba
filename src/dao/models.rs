use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Sport category used for dashboard filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    /// Team sports (football, cricket, ...).
    Team,
    /// Racket sports (badminton, table tennis, ...).
    Racket,
    /// Track and field events.
    Athletics,
    /// Indoor games (chess, carrom, ...).
    Indoor,
    /// Anything that does not fit the other buckets.
    Other,
}

/// Gender bracket a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    /// Boys bracket.
    Boys,
    /// Girls bracket.
    Girls,
}

/// Lifecycle status of a match. The expected progression is
/// Upcoming -> Live -> Finished; the store accepts any transition so
/// admins can correct mistakes (the service logs backward moves).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MatchStatus {
    /// Scheduled but not started; the only status in which votes are accepted.
    #[default]
    Upcoming,
    /// Currently being played.
    Live,
    /// Concluded; eligible for the results page and (if a final) standings.
    Finished,
}

impl MatchStatus {
    /// Position of the status in the expected lifecycle, used to detect
    /// backward transitions.
    pub fn rank(self) -> u8 {
        match self {
            MatchStatus::Upcoming => 0,
            MatchStatus::Live => 1,
            MatchStatus::Finished => 2,
        }
    }
}

/// Whether a match contributes to the medal standings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MedalRound {
    /// Regular match; never awards medals.
    #[default]
    None,
    /// Final: the winner earns Gold, the loser Silver.
    Final,
}

/// Side of a match a vote can be cast for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum VoteSide {
    /// First listed team.
    TeamA,
    /// Second listed team.
    TeamB,
}

/// One side of a match: a free-text team name and its current score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct TeamSideEntity {
    /// Display name as entered by the admin; never normalized in storage.
    pub name: String,
    /// Current score, zero until the match starts.
    pub score: u32,
}

/// Crowd-prediction tally for a match.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct VoteTallyEntity {
    /// Votes cast for team A.
    pub team_a: u32,
    /// Votes cast for team B.
    pub team_b: u32,
}

/// Match record as persisted and shared across layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEntity {
    /// Stable identifier assigned by the store at creation.
    pub id: Uuid,
    /// Name of the sport (e.g. "Football").
    pub sport_name: String,
    /// Sport category.
    pub category: Category,
    /// Gender bracket.
    pub gender: Gender,
    /// Opaque day label used for schedule grouping; never parsed as a date.
    pub date: String,
    /// Free-text start time, part of the list ordering key.
    pub time: String,
    /// Where the match is played.
    pub venue: String,
    /// Stage label such as "Semi Final".
    pub round_name: String,
    /// First team.
    pub team_a: TeamSideEntity,
    /// Second team.
    pub team_b: TeamSideEntity,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Winning team name; meaningful only once the match is finished.
    pub winner: Option<String>,
    /// Medal eligibility flag.
    pub medal_round: MedalRound,
    /// Prediction tally.
    pub votes: VoteTallyEntity,
    /// When the record was created.
    pub created_at: SystemTime,
    /// Last time any field of the record changed.
    pub updated_at: SystemTime,
}

/// Fields required to create a match. The store assigns the id, zeroes the
/// votes, and stamps the timestamps.
#[derive(Debug, Clone)]
pub struct NewMatch {
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
    pub team_a: TeamSideEntity,
    /// Second team.
    pub team_b: TeamSideEntity,
    /// Initial status, normally [`MatchStatus::Upcoming`].
    pub status: MatchStatus,
    /// Winning team name, normally unset at creation.
    pub winner: Option<String>,
    /// Medal eligibility flag.
    pub medal_round: MedalRound,
}

/// Partial update applied as a shallow merge: only present fields change.
///
/// Nested team structs replace the stored side wholesale, so callers must
/// send the complete `{name, score}` pair to avoid clobbering the other
/// field. Votes are deliberately absent: they only move through the
/// field-scoped increment operation so a racing score edit cannot undo a
/// vote.
#[derive(Debug, Clone, Default)]
pub struct MatchPatch {
    /// New sport name.
    pub sport_name: Option<String>,
    /// New category.
    pub category: Option<Category>,
    /// New gender bracket.
    pub gender: Option<Gender>,
    /// New day label.
    pub date: Option<String>,
    /// New start time.
    pub time: Option<String>,
    /// New venue.
    pub venue: Option<String>,
    /// New stage label.
    pub round_name: Option<String>,
    /// Full replacement for team A.
    pub team_a: Option<TeamSideEntity>,
    /// Full replacement for team B.
    pub team_b: Option<TeamSideEntity>,
    /// New status.
    pub status: Option<MatchStatus>,
    /// Winning team name.
    pub winner: Option<String>,
    /// New medal eligibility flag.
    pub medal_round: Option<MedalRound>,
}

impl MatchPatch {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.sport_name.is_none()
            && self.category.is_none()
            && self.gender.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.venue.is_none()
            && self.round_name.is_none()
            && self.team_a.is_none()
            && self.team_b.is_none()
            && self.status.is_none()
            && self.winner.is_none()
            && self.medal_round.is_none()
    }

    /// Apply the shallow merge to an existing record in place.
    pub fn apply_to(&self, record: &mut MatchEntity) {
        if let Some(value) = &self.sport_name {
            record.sport_name = value.clone();
        }
        if let Some(value) = self.category {
            record.category = value;
        }
        if let Some(value) = self.gender {
            record.gender = value;
        }
        if let Some(value) = &self.date {
            record.date = value.clone();
        }
        if let Some(value) = &self.time {
            record.time = value.clone();
        }
        if let Some(value) = &self.venue {
            record.venue = value.clone();
        }
        if let Some(value) = &self.round_name {
            record.round_name = value.clone();
        }
        if let Some(value) = &self.team_a {
            record.team_a = value.clone();
        }
        if let Some(value) = &self.team_b {
            record.team_b = value.clone();
        }
        if let Some(value) = self.status {
            record.status = value;
        }
        if let Some(value) = &self.winner {
            record.winner = Some(value.clone());
        }
        if let Some(value) = self.medal_round {
            record.medal_round = value;
        }
    }
}

/// Ordering key for the match list: ascending string comparison on
/// (date, time). Deliberately not calendar order; the day labels are
/// opaque strings.
pub fn list_order_key(record: &MatchEntity) -> (String, String) {
    (record.date.clone(), record.time.clone())
}

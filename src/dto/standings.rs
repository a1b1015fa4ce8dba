use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::matches::MatchSummary;

/// One row of the medal table: a normalized entity and its medal counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct StandingsRow {
    /// Canonical entity token (e.g. `"TY CS"`), not the raw team name.
    pub entity: String,
    /// Gold medals (final wins).
    pub gold: u32,
    /// Silver medals (final losses).
    pub silver: u32,
}

/// One schedule section: all matches sharing a day label.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleGroup {
    /// The day label the section groups by.
    pub date: String,
    /// Matches of that day, in list order.
    pub matches: Vec<MatchSummary>,
}

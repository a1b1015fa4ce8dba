use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{
    Category, Gender, MatchEntity, MatchStatus, MedalRound, TeamSideEntity, VoteTallyEntity,
};

/// Persisted shape of a match in the `matches` collection. Field names are
/// the merge targets of the partial-update path, so they must stay in sync
/// with the `$set`/`$inc` documents built in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMatchDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    sport_name: String,
    category: Category,
    gender: Gender,
    date: String,
    time: String,
    venue: String,
    round_name: String,
    team_a: TeamSideEntity,
    team_b: TeamSideEntity,
    status: MatchStatus,
    winner: Option<String>,
    medal_round: MedalRound,
    votes: VoteTallyEntity,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<MatchEntity> for MongoMatchDocument {
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
            team_a: value.team_a,
            team_b: value.team_b,
            status: value.status,
            winner: value.winner,
            medal_round: value.medal_round,
            votes: value.votes,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoMatchDocument> for MatchEntity {
    fn from(value: MongoMatchDocument) -> Self {
        Self {
            id: value.id,
            sport_name: value.sport_name,
            category: value.category,
            gender: value.gender,
            date: value.date,
            time: value.time,
            venue: value.venue,
            round_name: value.round_name,
            team_a: value.team_a,
            team_b: value.team_b,
            status: value.status,
            winner: value.winner,
            medal_round: value.medal_round,
            votes: value.votes,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

/// Filter document selecting a match by its id.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}

//! In-memory [`MatchStore`] used by tests and storage-less dev runs.

use std::{sync::Arc, time::SystemTime};

use futures::future::BoxFuture;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    match_store::MatchStore,
    models::{
        MatchEntity, MatchPatch, NewMatch, VoteSide, VoteTallyEntity, list_order_key,
    },
    storage::{StorageError, StorageResult},
};

/// Vec-backed store guarded by a single RwLock; mutations hold the write
/// guard for their whole duration, which gives the same per-record
/// atomicity a database backend would.
#[derive(Clone, Default)]
pub struct MemoryMatchStore {
    records: Arc<RwLock<Vec<MatchEntity>>>,
}

impl MemoryMatchStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryMatchStore {
    fn create_match(&self, fields: NewMatch) -> BoxFuture<'static, StorageResult<MatchEntity>> {
        let records = self.records.clone();
        Box::pin(async move {
            let now = SystemTime::now();
            let record = MatchEntity {
                id: Uuid::new_v4(),
                sport_name: fields.sport_name,
                category: fields.category,
                gender: fields.gender,
                date: fields.date,
                time: fields.time,
                venue: fields.venue,
                round_name: fields.round_name,
                team_a: fields.team_a,
                team_b: fields.team_b,
                status: fields.status,
                winner: fields.winner,
                medal_round: fields.medal_round,
                votes: VoteTallyEntity::default(),
                created_at: now,
                updated_at: now,
            };
            records.write().await.push(record.clone());
            Ok(record)
        })
    }

    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let records = self.records.clone();
        Box::pin(async move {
            let mut all = records.read().await.clone();
            all.sort_by_key(list_order_key);
            Ok(all)
        })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let records = self.records.clone();
        Box::pin(async move {
            let guard = records.read().await;
            Ok(guard.iter().find(|record| record.id == id).cloned())
        })
    }

    fn update_match(
        &self,
        id: Uuid,
        patch: MatchPatch,
    ) -> BoxFuture<'static, StorageResult<MatchEntity>> {
        let records = self.records.clone();
        Box::pin(async move {
            let mut guard = records.write().await;
            let record = guard
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or_else(|| StorageError::not_found(id))?;
            patch.apply_to(record);
            record.updated_at = SystemTime::now();
            Ok(record.clone())
        })
    }

    fn increment_vote(
        &self,
        id: Uuid,
        side: VoteSide,
    ) -> BoxFuture<'static, StorageResult<MatchEntity>> {
        let records = self.records.clone();
        Box::pin(async move {
            let mut guard = records.write().await;
            let record = guard
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or_else(|| StorageError::not_found(id))?;
            match side {
                VoteSide::TeamA => record.votes.team_a += 1,
                VoteSide::TeamB => record.votes.team_b += 1,
            }
            record.updated_at = SystemTime::now();
            Ok(record.clone())
        })
    }

    fn delete_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>> {
        let records = self.records.clone();
        Box::pin(async move {
            let mut guard = records.write().await;
            let before = guard.len();
            guard.retain(|record| record.id != id);
            if guard.len() == before {
                return Err(StorageError::not_found(id));
            }
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::{Category, Gender, MatchStatus, MedalRound, TeamSideEntity};

    fn sample(date: &str, time: &str) -> NewMatch {
        NewMatch {
            sport_name: "Football".into(),
            category: Category::Team,
            gender: Gender::Boys,
            date: date.into(),
            time: time.into(),
            venue: "Main Ground".into(),
            round_name: String::new(),
            team_a: TeamSideEntity {
                name: "SY IT".into(),
                score: 0,
            },
            team_b: TeamSideEntity {
                name: "TY CS".into(),
                score: 0,
            },
            status: MatchStatus::Upcoming,
            winner: None,
            medal_round: MedalRound::None,
        }
    }

    #[tokio::test]
    async fn list_orders_by_date_then_time() {
        let store = MemoryMatchStore::new();
        store.create_match(sample("Jan 24", "10:00")).await.unwrap();
        store.create_match(sample("Jan 23", "16:00")).await.unwrap();
        store.create_match(sample("Jan 24", "09:00")).await.unwrap();

        let keys: Vec<(String, String)> = store
            .list_matches()
            .await
            .unwrap()
            .iter()
            .map(list_order_key)
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Jan 23".into(), "16:00".into()),
                ("Jan 24".into(), "09:00".into()),
                ("Jan 24".into(), "10:00".into()),
            ]
        );
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let store = MemoryMatchStore::new();
        let err = store.delete_match(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_merges_only_present_fields() {
        let store = MemoryMatchStore::new();
        let created = store.create_match(sample("Jan 23", "10:00")).await.unwrap();

        let patch = MatchPatch {
            status: Some(MatchStatus::Live),
            team_a: Some(TeamSideEntity {
                name: "SY IT".into(),
                score: 2,
            }),
            ..MatchPatch::default()
        };
        let updated = store.update_match(created.id, patch).await.unwrap();
        assert_eq!(updated.status, MatchStatus::Live);
        assert_eq!(updated.team_a.score, 2);
        // untouched fields survive the merge
        assert_eq!(updated.team_b.name, "TY CS");
        assert_eq!(updated.venue, "Main Ground");
    }

    #[tokio::test]
    async fn increment_vote_is_field_scoped() {
        let store = MemoryMatchStore::new();
        let created = store.create_match(sample("Jan 23", "10:00")).await.unwrap();

        store
            .increment_vote(created.id, VoteSide::TeamA)
            .await
            .unwrap();
        let after = store
            .increment_vote(created.id, VoteSide::TeamA)
            .await
            .unwrap();
        assert_eq!(after.votes.team_a, 2);
        assert_eq!(after.votes.team_b, 0);
    }
}

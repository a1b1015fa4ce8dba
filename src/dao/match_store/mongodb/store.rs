use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::{DateTime, Document, doc, serialize_to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoMatchDocument, doc_id},
};
use crate::dao::{
    match_store::MatchStore,
    models::{MatchEntity, MatchPatch, NewMatch, VoteSide, VoteTallyEntity},
    storage::{StorageError, StorageResult},
};

const MATCH_COLLECTION_NAME: &str = "matches";

/// MongoDB-backed match store. Cloning is cheap; all clones share one
/// connection.
#[derive(Clone)]
pub struct MongoMatchStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoMatchStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        // (date, time) is the list ordering key, so keep it indexed.
        let collection = self.collection().await;
        let index = mongodb::IndexModel::builder()
            .keys(doc! {"date": 1, "time": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("match_schedule_idx".to_owned()))
                    .build(),
            )
            .build();

        collection
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: MATCH_COLLECTION_NAME,
                index: "date,time",
                source,
            })?;

        Ok(())
    }

    async fn collection(&self) -> Collection<MongoMatchDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoMatchDocument>(MATCH_COLLECTION_NAME)
    }

    async fn insert(&self, record: MatchEntity) -> MongoResult<()> {
        let id = record.id;
        let document: MongoMatchDocument = record.into();
        let collection = self.collection().await;
        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::InsertMatch { id, source })?;
        Ok(())
    }

    async fn list(&self) -> MongoResult<Vec<MatchEntity>> {
        let collection = self.collection().await;
        let documents: Vec<MongoMatchDocument> = collection
            .find(doc! {})
            .sort(doc! {"date": 1, "time": 1})
            .await
            .map_err(|source| MongoDaoError::ListMatches { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListMatches { source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: Uuid) -> MongoResult<Option<MatchEntity>> {
        let collection = self.collection().await;
        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadMatch { id, source })?;
        Ok(document.map(Into::into))
    }

    async fn apply_update(&self, id: Uuid, update: Document) -> MongoResult<Option<MatchEntity>> {
        let collection = self.collection().await;
        let document = collection
            .find_one_and_update(doc_id(id), update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|source| MongoDaoError::UpdateMatch { id, source })?;
        Ok(document.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> MongoResult<bool> {
        let collection = self.collection().await;
        let result = collection
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteMatch { id, source })?;
        Ok(result.deleted_count > 0)
    }
}

/// Serialize the present patch fields into a `$set` document. Nested team
/// structs replace the stored side wholesale, mirroring the shallow-merge
/// contract of the trait.
fn patch_to_set(id: Uuid, patch: &MatchPatch) -> MongoResult<Document> {
    let encode = |err| MongoDaoError::EncodePatch { id, source: err };

    let mut set = doc! {"updated_at": DateTime::now()};
    if let Some(value) = &patch.sport_name {
        set.insert("sport_name", value.clone());
    }
    if let Some(value) = &patch.category {
        set.insert("category", serialize_to_bson(value).map_err(encode)?);
    }
    if let Some(value) = &patch.gender {
        set.insert("gender", serialize_to_bson(value).map_err(encode)?);
    }
    if let Some(value) = &patch.date {
        set.insert("date", value.clone());
    }
    if let Some(value) = &patch.time {
        set.insert("time", value.clone());
    }
    if let Some(value) = &patch.venue {
        set.insert("venue", value.clone());
    }
    if let Some(value) = &patch.round_name {
        set.insert("round_name", value.clone());
    }
    if let Some(value) = &patch.team_a {
        set.insert("team_a", serialize_to_bson(value).map_err(encode)?);
    }
    if let Some(value) = &patch.team_b {
        set.insert("team_b", serialize_to_bson(value).map_err(encode)?);
    }
    if let Some(value) = &patch.status {
        set.insert("status", serialize_to_bson(value).map_err(encode)?);
    }
    if let Some(value) = &patch.winner {
        set.insert("winner", value.clone());
    }
    if let Some(value) = &patch.medal_round {
        set.insert("medal_round", serialize_to_bson(value).map_err(encode)?);
    }
    Ok(doc! {"$set": set})
}

impl MatchStore for MongoMatchStore {
    fn create_match(&self, fields: NewMatch) -> BoxFuture<'static, StorageResult<MatchEntity>> {
        let store = self.clone();
        Box::pin(async move {
            let now = std::time::SystemTime::now();
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
            store.insert(record.clone()).await?;
            Ok(record)
        })
    }

    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.list().await?) })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.find(id).await?) })
    }

    fn update_match(
        &self,
        id: Uuid,
        patch: MatchPatch,
    ) -> BoxFuture<'static, StorageResult<MatchEntity>> {
        let store = self.clone();
        Box::pin(async move {
            let update = patch_to_set(id, &patch)?;
            store
                .apply_update(id, update)
                .await?
                .ok_or_else(|| StorageError::not_found(id))
        })
    }

    fn increment_vote(
        &self,
        id: Uuid,
        side: VoteSide,
    ) -> BoxFuture<'static, StorageResult<MatchEntity>> {
        let store = self.clone();
        Box::pin(async move {
            let field = match side {
                VoteSide::TeamA => "votes.team_a",
                VoteSide::TeamB => "votes.team_b",
            };
            let update = doc! {
                "$inc": { field: 1 },
                "$set": { "updated_at": DateTime::now() },
            };
            store
                .apply_update(id, update)
                .await?
                .ok_or_else(|| StorageError::not_found(id))
        })
    }

    fn delete_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            if store.delete(id).await? {
                Ok(())
            } else {
                Err(StorageError::not_found(id))
            }
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.ping().await?) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.reconnect().await?) })
    }
}

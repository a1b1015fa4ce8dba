pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{MatchEntity, MatchPatch, NewMatch, VoteSide};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for match records.
///
/// Every operation targets a single record, so the backend's per-document
/// atomicity is the only concurrency guarantee a store has to provide.
pub trait MatchStore: Send + Sync {
    /// Persist a new match: the store assigns the id, zeroes the votes and
    /// stamps the timestamps.
    fn create_match(&self, fields: NewMatch) -> BoxFuture<'static, StorageResult<MatchEntity>>;
    /// All matches, sorted ascending by (date, time) string comparison.
    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>>;
    /// Look up a single match by id.
    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>>;
    /// Shallow-merge the patch into the stored record and return the result.
    fn update_match(
        &self,
        id: Uuid,
        patch: MatchPatch,
    ) -> BoxFuture<'static, StorageResult<MatchEntity>>;
    /// Field-scoped atomic vote increment; never races with [`Self::update_match`]
    /// on the rest of the document.
    fn increment_vote(
        &self,
        id: Uuid,
        side: VoteSide,
    ) -> BoxFuture<'static, StorageResult<MatchEntity>>;
    /// Remove a match; fails with `NotFound` rather than silently succeeding.
    fn delete_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap connectivity probe used by the storage supervisor.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish a dropped backend connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

#[cfg(feature = "couch-store")]
pub mod couchdb;
pub mod local;

use crate::dao::models::GarmentEntity;
use crate::dao::storage::StorageResult;
use crate::outfit::Category;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer holding the closet.
pub trait GarmentStore: Send + Sync {
    fn save_garment(&self, garment: GarmentEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_garment(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GarmentEntity>>>;
    /// Every garment, newest first.
    fn list_garments(&self) -> BoxFuture<'static, StorageResult<Vec<GarmentEntity>>>;
    /// Garments of one category, newest first.
    fn list_by_category(
        &self,
        category: Category,
    ) -> BoxFuture<'static, StorageResult<Vec<GarmentEntity>>>;
    /// Remove a garment, returning whether it existed.
    fn delete_garment(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    fn count_garments(&self) -> BoxFuture<'static, StorageResult<usize>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

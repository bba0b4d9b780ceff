//! Closet kept in process memory, optionally mirrored to a JSON snapshot on disk.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use futures::future::BoxFuture;
use thiserror::Error;
use tokio::{fs, sync::Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dao::{
        garment_store::GarmentStore,
        models::{GarmentEntity, sort_newest_first},
        storage::{StorageError, StorageResult},
    },
    outfit::Category,
};

/// Convenient result alias returning [`LocalStoreError`] failures.
pub type LocalResult<T> = Result<T, LocalStoreError>;

/// Failures that can occur while reading or writing the snapshot file.
#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("failed to read closet snapshot `{path}`")]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse closet snapshot `{path}`")]
    ParseSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode closet snapshot")]
    EncodeSnapshot {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write closet snapshot `{path}`")]
    WriteSnapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot directory `{path}` is not available")]
    SnapshotDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<LocalStoreError> for StorageError {
    fn from(err: LocalStoreError) -> Self {
        match err {
            LocalStoreError::ParseSnapshot { .. } => StorageError::corrupted(err.to_string(), err),
            _ => StorageError::unavailable(err.to_string(), err),
        }
    }
}

/// Garment store backed by a concurrent map.
#[derive(Clone)]
pub struct LocalGarmentStore {
    inner: Arc<LocalInner>,
}

struct LocalInner {
    garments: DashMap<Uuid, GarmentEntity>,
    snapshot: Option<PathBuf>,
    /// Serialises snapshot writes so the file always reflects a complete map.
    write_gate: Mutex<()>,
}

impl LocalGarmentStore {
    /// A store that forgets everything when the process exits.
    pub fn in_memory() -> Self {
        Self::with_contents(Vec::new(), None)
    }

    /// Open a store mirrored to `path`, loading any garments already saved there.
    ///
    /// A missing file is treated as an empty closet.
    pub async fn open(path: impl Into<PathBuf>) -> LocalResult<Self> {
        let path = path.into();
        let garments = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<GarmentEntity>>(&bytes).map_err(|source| {
                LocalStoreError::ParseSnapshot {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no closet snapshot yet; starting empty");
                Vec::new()
            }
            Err(source) => {
                return Err(LocalStoreError::ReadSnapshot {
                    path: path.clone(),
                    source,
                });
            }
        };

        info!(
            path = %path.display(),
            count = garments.len(),
            "loaded closet snapshot"
        );
        Ok(Self::with_contents(garments, Some(path)))
    }

    fn with_contents(garments: Vec<GarmentEntity>, snapshot: Option<PathBuf>) -> Self {
        let map = DashMap::with_capacity(garments.len());
        for garment in garments {
            map.insert(garment.id, garment);
        }
        Self {
            inner: Arc::new(LocalInner {
                garments: map,
                snapshot,
                write_gate: Mutex::new(()),
            }),
        }
    }

    /// Path of the snapshot file, if the store is persistent.
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.inner.snapshot.as_deref()
    }

    fn collect<F>(&self, keep: F) -> Vec<GarmentEntity>
    where
        F: Fn(&GarmentEntity) -> bool,
    {
        let mut garments: Vec<GarmentEntity> = self
            .inner
            .garments
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        sort_newest_first(&mut garments);
        garments
    }

    /// Rewrite the snapshot file from the current map content.
    async fn persist(&self) -> LocalResult<()> {
        let Some(path) = self.inner.snapshot.as_ref() else {
            return Ok(());
        };

        let _gate = self.inner.write_gate.lock().await;
        let garments = self.collect(|_| true);
        let bytes = serde_json::to_vec_pretty(&garments)
            .map_err(|source| LocalStoreError::EncodeSnapshot { source })?;

        // write beside the target then rename, so readers never see half a file
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, &bytes)
            .await
            .map_err(|source| LocalStoreError::WriteSnapshot {
                path: staging.clone(),
                source,
            })?;
        fs::rename(&staging, path)
            .await
            .map_err(|source| LocalStoreError::WriteSnapshot {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), count = garments.len(), "closet snapshot written");
        Ok(())
    }

    async fn ensure_directory(&self) -> LocalResult<()> {
        let Some(dir) = self
            .inner
            .snapshot
            .as_ref()
            .and_then(|path| path.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
        else {
            return Ok(());
        };

        fs::create_dir_all(dir)
            .await
            .map_err(|source| LocalStoreError::SnapshotDirectory {
                path: dir.to_path_buf(),
                source,
            })
    }
}

impl GarmentStore for LocalGarmentStore {
    fn save_garment(&self, garment: GarmentEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let id = garment.id;
            let previous = store.inner.garments.insert(id, garment);
            if let Err(err) = store.persist().await {
                // keep memory in line with what is on disk
                match previous {
                    Some(previous) => {
                        store.inner.garments.insert(id, previous);
                    }
                    None => {
                        store.inner.garments.remove(&id);
                    }
                }
                warn!(%id, error = %err, "garment save rolled back");
                return Err(StorageError::from(err));
            }
            Ok(())
        })
    }

    fn find_garment(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GarmentEntity>>> {
        let found = self.inner.garments.get(&id).map(|entry| entry.value().clone());
        Box::pin(async move { Ok(found) })
    }

    fn list_garments(&self) -> BoxFuture<'static, StorageResult<Vec<GarmentEntity>>> {
        let garments = self.collect(|_| true);
        Box::pin(async move { Ok(garments) })
    }

    fn list_by_category(
        &self,
        category: Category,
    ) -> BoxFuture<'static, StorageResult<Vec<GarmentEntity>>> {
        let garments = self.collect(|garment| garment.category == category);
        Box::pin(async move { Ok(garments) })
    }

    fn delete_garment(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            let Some((_, removed)) = store.inner.garments.remove(&id) else {
                return Ok(false);
            };
            if let Err(err) = store.persist().await {
                store.inner.garments.insert(id, removed);
                warn!(%id, error = %err, "garment delete rolled back");
                return Err(StorageError::from(err));
            }
            Ok(true)
        })
    }

    fn count_garments(&self) -> BoxFuture<'static, StorageResult<usize>> {
        let count = self.inner.garments.len();
        Box::pin(async move { Ok(count) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let dir = self
            .inner
            .snapshot
            .as_ref()
            .and_then(|path| path.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Box::pin(async move {
            let Some(dir) = dir else {
                return Ok(());
            };
            match fs::metadata(&dir).await {
                Ok(meta) if meta.is_dir() => Ok(()),
                Ok(_) => Err(LocalStoreError::SnapshotDirectory {
                    path: dir,
                    source: std::io::Error::new(ErrorKind::NotADirectory, "not a directory"),
                }
                .into()),
                Err(source) => Err(LocalStoreError::SnapshotDirectory { path: dir, source }.into()),
            }
        })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.ensure_directory().await?;
            store.persist().await.map_err(Into::into)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;
    use crate::outfit::Rgb;

    fn garment(category: Category, age_secs: u64) -> GarmentEntity {
        GarmentEntity {
            id: Uuid::new_v4(),
            category,
            dominant_color: Some(Rgb::new(120, 40, 40)),
            palette: vec![Rgb::new(120, 40, 40), Rgb::new(20, 20, 20)],
            label: None,
            image_ref: None,
            added_at: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 - age_secs),
        }
    }

    #[tokio::test]
    async fn lists_newest_first_and_filters_by_category() {
        let store = LocalGarmentStore::in_memory();
        let old_top = garment(Category::Top, 300);
        let new_top = garment(Category::Top, 10);
        let shoes = garment(Category::Shoes, 100);
        for entity in [old_top.clone(), new_top.clone(), shoes.clone()] {
            store.save_garment(entity).await.unwrap();
        }

        let all = store.list_garments().await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![new_top.id, shoes.id, old_top.id]);

        let tops = store.list_by_category(Category::Top).await.unwrap();
        assert_eq!(tops.len(), 2);
        assert!(tops.iter().all(|g| g.category == Category::Top));

        assert!(
            store
                .list_by_category(Category::Accessory)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(store.count_garments().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn delete_reports_whether_the_garment_existed() {
        let store = LocalGarmentStore::in_memory();
        let entity = garment(Category::Bottom, 5);
        store.save_garment(entity.clone()).await.unwrap();

        assert!(store.delete_garment(entity.id).await.unwrap());
        assert!(!store.delete_garment(entity.id).await.unwrap());
        assert!(store.find_garment(entity.id).await.unwrap().is_none());
        assert_eq!(store.count_garments().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closet.json");

        let kept = garment(Category::Outerwear, 50);
        let dropped = garment(Category::Accessory, 20);
        {
            let store = LocalGarmentStore::open(&path).await.unwrap();
            assert_eq!(store.count_garments().await.unwrap(), 0);
            store.save_garment(kept.clone()).await.unwrap();
            store.save_garment(dropped.clone()).await.unwrap();
            store.delete_garment(dropped.id).await.unwrap();
        }

        let reopened = LocalGarmentStore::open(&path).await.unwrap();
        assert_eq!(reopened.snapshot_path(), Some(path.as_path()));
        assert_eq!(reopened.list_garments().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closet.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let err = LocalGarmentStore::open(&path).await.err().unwrap();
        assert!(matches!(err, LocalStoreError::ParseSnapshot { .. }));
        assert!(matches!(
            StorageError::from(err),
            StorageError::Corrupted { .. }
        ));
    }

    #[tokio::test]
    async fn failed_snapshot_write_leaves_the_closet_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("missing");
        let store = LocalGarmentStore::open(nested.join("closet.json"))
            .await
            .unwrap();

        let lost = garment(Category::Top, 15);
        assert!(store.save_garment(lost.clone()).await.is_err());
        assert!(store.list_garments().await.unwrap().is_empty());
        assert!(store.find_garment(lost.id).await.unwrap().is_none());

        store.try_reconnect().await.unwrap();
        let kept = garment(Category::Bottom, 10);
        store.save_garment(kept.clone()).await.unwrap();

        let mut renamed = kept.clone();
        renamed.label = Some("Renamed".into());
        tokio::fs::remove_dir_all(&nested).await.unwrap();
        assert!(store.save_garment(renamed).await.is_err());
        assert_eq!(store.find_garment(kept.id).await.unwrap(), Some(kept.clone()));

        assert!(store.delete_garment(kept.id).await.is_err());
        assert_eq!(store.list_garments().await.unwrap(), vec![kept]);
        assert_eq!(store.count_garments().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn health_follows_the_snapshot_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        let store = LocalGarmentStore::open(nested.join("closet.json"))
            .await
            .unwrap();

        assert!(store.health_check().await.is_err());
        store.try_reconnect().await.unwrap();
        store.health_check().await.unwrap();
        assert!(nested.join("closet.json").exists());

        assert!(LocalGarmentStore::in_memory().health_check().await.is_ok());
    }
}

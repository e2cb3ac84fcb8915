use crate::{
    collection::{Collection, Filter},
    dataset::Dataset,
    error::DbError,
};
use log::{debug, info};
use models::Id;
use serde_json::Value;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::RwLock;

/// Default location of the mock database file
pub const DEFAULT_DATABASE_PATH: &str = "data/db.json";

/// The mock database: a [`Dataset`] shared behind a lock, optionally
/// mirrored to a JSON file after every write
#[derive(Debug, Clone)]
pub struct JsonDb {
    data: Arc<RwLock<Dataset>>,
    path: Option<PathBuf>,
}

impl JsonDb {
    /// Loads the dataset from `path`; writes go back to the same file
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref().to_path_buf();
        let text = tokio::fs::read_to_string(&path).await?;
        let dataset = Dataset::from_json_str(&text)?;

        info!(
            "Loaded {} with {} students, {} courses and {} shifts",
            path.display(),
            dataset.students.len(),
            dataset.courses.len(),
            dataset.shifts.len()
        );

        Ok(Self {
            data: Arc::new(RwLock::new(dataset)),
            path: Some(path),
        })
    }

    /// Keeps everything in memory
    pub fn in_memory(dataset: Dataset) -> Self {
        Self {
            data: Arc::new(RwLock::new(dataset)),
            path: None,
        }
    }

    /// Stops mirroring writes to disk
    pub fn detached(self) -> Self {
        Self {
            data: self.data,
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// A copy of the whole dataset
    pub async fn snapshot(&self) -> Dataset {
        self.data.read().await.clone()
    }

    pub async fn record_count(&self) -> usize {
        self.data.read().await.record_count()
    }

    pub async fn list(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>, DbError> {
        self.data.read().await.table(collection).list(filter)
    }

    pub async fn get(&self, collection: Collection, id: Id) -> Result<Option<Value>, DbError> {
        self.data.read().await.table(collection).get(id)
    }

    pub async fn insert(&self, collection: Collection, record: Value) -> Result<Value, DbError> {
        self.write(|data| {
            let stored = data.table_mut(collection).insert(record)?;
            Ok((stored, true))
        })
        .await
    }

    pub async fn patch(
        &self,
        collection: Collection,
        id: Id,
        changes: Value,
    ) -> Result<Option<Value>, DbError> {
        self.write(|data| {
            let patched = data.table_mut(collection).patch(id, changes)?;
            let changed = patched.is_some();
            Ok((patched, changed))
        })
        .await
    }

    pub async fn remove(&self, collection: Collection, id: Id) -> Result<Option<Value>, DbError> {
        self.write(|data| {
            let removed = data.table_mut(collection).remove(id)?;
            let changed = removed.is_some();
            Ok((removed, changed))
        })
        .await
    }

    /// Applies `change` to a copy of the dataset and publishes the copy only
    /// once it is on disk. The flag returned by `change` says whether
    /// anything was modified.
    async fn write<R>(
        &self,
        change: impl FnOnce(&mut Dataset) -> Result<(R, bool), DbError>,
    ) -> Result<R, DbError> {
        let mut data = self.data.write().await;
        let mut staged = data.clone();

        let (result, changed) = change(&mut staged)?;
        if changed {
            self.flush(&staged).await?;
            *data = staged;
        }

        Ok(result)
    }

    /// Writes the dataset back to its file, if it has one. Called with the
    /// write lock held so concurrent writers can't interleave files.
    async fn flush(&self, data: &Dataset) -> Result<(), DbError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        tokio::fs::write(path, data.to_json_string()?).await?;
        debug!("Wrote {}", path.display());

        Ok(())
    }
}

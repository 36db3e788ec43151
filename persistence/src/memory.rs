//! Reference store keeping records in process memory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    record::{Record, RecordId},
    store::{Store, StoreError},
};

#[derive(Debug)]
pub(crate) struct Table<R: Record> {
    pub(crate) records: BTreeMap<R::Id, R>,
    next_id: u32,
}

impl<R: Record> Table<R> {
    fn seeded(records: Vec<R>) -> Self {
        let records: BTreeMap<R::Id, R> = records
            .into_iter()
            .map(|record| (record.id(), record))
            .collect();
        let next_id = records
            .keys()
            .next_back()
            .map_or(1, |last| last.raw().saturating_add(1));
        Self { records, next_id }
    }

    fn insert(&mut self, mut record: R) -> R {
        let id = R::Id::from_raw(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        record.assign_id(id);
        let _ = self.records.insert(id, record.clone());
        record
    }
}

/// Store backed by an ordered map behind a tokio `RwLock`.
///
/// Identifiers are allocated from one upward, continuing after the largest
/// seeded identifier.
#[derive(Debug)]
pub struct InMemoryStore<R: Record> {
    pub(crate) table: RwLock<Table<R>>,
}

impl<R: Record> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::seeded(Vec::new())
    }
}

impl<R: Record> InMemoryStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the provided records under their own identifiers.
    #[must_use]
    pub fn seeded(records: Vec<R>) -> Self {
        Self {
            table: RwLock::new(Table::seeded(records)),
        }
    }

    /// Copies every record out of the store in identifier order.
    pub async fn dump(&self) -> Vec<R> {
        self.table.read().await.records.values().cloned().collect()
    }
}

#[async_trait]
impl<R: Record> Store<R> for InMemoryStore<R> {
    async fn get_all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.dump().await)
    }

    async fn get_by_id(&self, id: R::Id) -> Result<Option<R>, StoreError> {
        Ok(self.table.read().await.records.get(&id).cloned())
    }

    async fn get_by_parent(&self, parent: R::Parent) -> Result<Vec<R>, StoreError> {
        Ok(self
            .table
            .read()
            .await
            .records
            .values()
            .filter(|record| record.parent() == Some(parent))
            .cloned()
            .collect())
    }

    async fn create(&self, record: R) -> Result<R, StoreError> {
        Ok(self.table.write().await.insert(record))
    }

    async fn create_bulk(&self, records: Vec<R>) -> Result<Vec<R>, StoreError> {
        let mut table = self.table.write().await;
        Ok(records
            .into_iter()
            .map(|record| table.insert(record))
            .collect())
    }

    async fn update(&self, record: R) -> Result<Option<R>, StoreError> {
        let mut table = self.table.write().await;
        match table.records.get_mut(&record.id()) {
            Some(stored) => {
                *stored = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: R::Id) -> Result<bool, StoreError> {
        Ok(self.table.write().await.records.remove(&id).is_some())
    }

    async fn delete_by_parent(&self, parent: R::Parent) -> Result<bool, StoreError> {
        self.table
            .write()
            .await
            .records
            .retain(|_, record| record.parent() != Some(parent));
        Ok(true)
    }
}

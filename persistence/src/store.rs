//! Asynchronous CRUD boundary implemented once per record type.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::Record;

/// Errors reported by a store implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing service could not be reached.
    #[error("{kind} store unavailable: {reason}")]
    Unavailable {
        /// Record type the call targeted.
        kind: &'static str,
        /// Backend supplied detail.
        reason: String,
    },
    /// The backing service refused the record.
    #[error("{kind} store rejected the request: {reason}")]
    Rejected {
        /// Record type the call targeted.
        kind: &'static str,
        /// Backend supplied detail.
        reason: String,
    },
}

/// CRUD operations for a single record type.
///
/// Implementations must be `Send + Sync` so handles can be shared as
/// `Arc<dyn Store<R>>` across tasks.
#[async_trait]
pub trait Store<R: Record>: Send + Sync {
    /// Every stored record in identifier order.
    async fn get_all(&self) -> Result<Vec<R>, StoreError>;

    /// Record with the provided identifier.
    async fn get_by_id(&self, id: R::Id) -> Result<Option<R>, StoreError>;

    /// Records owned by the provided parent.
    async fn get_by_parent(&self, parent: R::Parent) -> Result<Vec<R>, StoreError>;

    /// Stores the record under a newly allocated identifier and returns it.
    async fn create(&self, record: R) -> Result<R, StoreError>;

    /// Stores every record, preserving input order in the result.
    async fn create_bulk(&self, records: Vec<R>) -> Result<Vec<R>, StoreError> {
        let mut created = Vec::with_capacity(records.len());
        for record in records {
            created.push(self.create(record).await?);
        }
        Ok(created)
    }

    /// Replaces the stored record with the same identifier.
    ///
    /// Returns `None` when no such record exists.
    async fn update(&self, record: R) -> Result<Option<R>, StoreError>;

    /// Removes the record, reporting whether it existed.
    async fn delete(&self, id: R::Id) -> Result<bool, StoreError>;

    /// Removes every record owned by the parent.
    ///
    /// Reports `true` only when each fetched record was deleted.
    async fn delete_by_parent(&self, parent: R::Parent) -> Result<bool, StoreError> {
        let owned = self.get_by_parent(parent).await?;
        let mut removed_all = true;
        for record in owned {
            removed_all &= self.delete(record.id()).await?;
        }
        Ok(removed_all)
    }
}

//! Registry storage effect.
//!
//! The verifier and issuer only need point lookups, inserts and per-kind
//! scans, so any key-value backend can stand in for the in-memory handler.

use crate::{Result, TagKind, TagRecord};
use async_trait::async_trait;

/// Outcome of a conditional insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was stored
    Inserted,
    /// A record with the same kind and identifier already exists; nothing was written
    AlreadyExists,
}

/// Storage capability for tag records keyed by `(kind, id)`
#[async_trait]
pub trait RegistryStorage: Send + Sync {
    /// Look up a record
    async fn get(&self, kind: TagKind, id: &str) -> Result<Option<TagRecord>>;

    /// Insert a record unless its `(kind, id)` is already taken
    async fn put(&self, record: TagRecord) -> Result<PutOutcome>;

    /// All records of one kind, ordered by identifier
    async fn scan(&self, kind: TagKind) -> Result<Vec<TagRecord>>;

    /// Number of records of one kind
    async fn count(&self, kind: TagKind) -> Result<usize> {
        Ok(self.scan(kind).await?.len())
    }
}

/// Blanket implementation for Arc<T> where T: RegistryStorage
#[async_trait]
impl<T: RegistryStorage + ?Sized> RegistryStorage for std::sync::Arc<T> {
    async fn get(&self, kind: TagKind, id: &str) -> Result<Option<TagRecord>> {
        (**self).get(kind, id).await
    }

    async fn put(&self, record: TagRecord) -> Result<PutOutcome> {
        (**self).put(record).await
    }

    async fn scan(&self, kind: TagKind) -> Result<Vec<TagRecord>> {
        (**self).scan(kind).await
    }

    async fn count(&self, kind: TagKind) -> Result<usize> {
        (**self).count(kind).await
    }
}

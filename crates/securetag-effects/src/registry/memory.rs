//! In-memory registry storage handler
//!
//! Records live in a `BTreeMap` keyed by `(kind, id)` so scans come back
//! ordered by identifier. All state is lost when the process exits.

use async_trait::async_trait;
use securetag_core::{PutOutcome, RegistryStorage, Result, TagKind, TagRecord};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type RegistryKey = (TagKind, String);

/// In-memory registry handler
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistryHandler {
    records: Arc<RwLock<BTreeMap<RegistryKey, TagRecord>>>,
}

impl MemoryRegistryHandler {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `records`; later duplicates are dropped
    pub fn with_records(records: impl IntoIterator<Item = TagRecord>) -> Self {
        let mut map = BTreeMap::new();
        for record in records {
            map.entry((record.kind, record.id.clone())).or_insert(record);
        }
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl RegistryStorage for MemoryRegistryHandler {
    async fn get(&self, kind: TagKind, id: &str) -> Result<Option<TagRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&(kind, id.to_string())).cloned())
    }

    async fn put(&self, record: TagRecord) -> Result<PutOutcome> {
        let mut records = self.records.write().await;
        match records.entry((record.kind, record.id.clone())) {
            Entry::Occupied(_) => Ok(PutOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(PutOutcome::Inserted)
            }
        }
    }

    async fn scan(&self, kind: TagKind) -> Result<Vec<TagRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn count(&self, kind: TagKind) -> Result<usize> {
        let records = self.records.read().await;
        Ok(records.keys().filter(|(k, _)| *k == kind).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(kind: TagKind, id: &str, name: &str) -> TagRecord {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        TagRecord {
            id: id.to_string(),
            kind,
            name: name.to_string(),
            department: "HR".to_string(),
            access_level: "Level 1".to_string(),
            valid_until: ts,
            secure_token: None,
            created_at: ts,
            tag_type: None,
            content: None,
        }
    }

    #[tokio::test]
    async fn test_put_does_not_overwrite() {
        let registry = MemoryRegistryHandler::new();
        let first = record(TagKind::Qr, "A", "first");
        assert_eq!(registry.put(first.clone()).await.unwrap(), PutOutcome::Inserted);
        assert_eq!(
            registry.put(record(TagKind::Qr, "A", "second")).await.unwrap(),
            PutOutcome::AlreadyExists
        );
        assert_eq!(registry.get(TagKind::Qr, "A").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_kinds_are_separate_namespaces() {
        let registry = MemoryRegistryHandler::with_records([
            record(TagKind::Qr, "SAME", "qr"),
            record(TagKind::Nfc, "SAME", "nfc"),
            record(TagKind::Qr, "B", "qr"),
        ]);
        assert_eq!(registry.count(TagKind::Qr).await.unwrap(), 2);
        assert_eq!(registry.count(TagKind::Nfc).await.unwrap(), 1);
        let nfc = registry.get(TagKind::Nfc, "SAME").await.unwrap().unwrap();
        assert_eq!(nfc.name, "nfc");
        assert!(registry.get(TagKind::Nfc, "B").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scan_is_ordered_by_id() {
        let registry = MemoryRegistryHandler::with_records([
            record(TagKind::Qr, "C", "c"),
            record(TagKind::Qr, "A", "a"),
            record(TagKind::Qr, "B", "b"),
        ]);
        let ids: Vec<_> = registry
            .scan(TagKind::Qr)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }
}

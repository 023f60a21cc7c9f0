use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Record, RecordId, RecordQuery, RecordStore, Result, StoreError, Stored};

/// In-memory record store.
///
/// Records live for as long as the store (or any clone of it) does. Clones
/// share the same underlying map, so a store can be handed to several
/// services and observed from tests.
#[derive(Clone)]
pub struct InMemoryRecordStore<R: Record> {
    inner: Arc<RwLock<Inner<R>>>,
}

struct Inner<R> {
    records: BTreeMap<RecordId, R>,
    next_id: RecordId,
}

impl<R: Record> Inner<R> {
    fn conflicting(&self, name: &str) -> Option<RecordId> {
        self.records
            .iter()
            .find(|(_, record)| record.same_name(name))
            .map(|(id, _)| *id)
    }

    fn insert(&mut self, record: R) -> Result<Stored<R>> {
        if let Some(existing) = self.conflicting(record.name()) {
            return Err(StoreError::Conflict {
                kind: R::KIND,
                name: record.name().to_string(),
                existing,
            });
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.records.insert(id, record.clone());
        Ok(Stored::new(id, record))
    }
}

impl<R: Record> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: RecordId::FIRST,
            })),
        }
    }
}

impl<R: Record> InMemoryRecordStore<R> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`, assigning ids from 1.
    ///
    /// Fails with `Conflict` if two seed records share a name.
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Result<Self> {
        let mut inner = Inner {
            records: BTreeMap::new(),
            next_id: RecordId::FIRST,
        };
        for record in records {
            inner.insert(record)?;
        }
        Ok(Self {
            inner: Arc::new(RwLock::new(inner)),
        })
    }

    /// Returns the identifier the next successful create will assign.
    pub async fn next_id(&self) -> RecordId {
        self.inner.read().await.next_id
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for InMemoryRecordStore<R> {
    async fn get(&self, id: RecordId) -> Result<Stored<R>> {
        let inner = self.inner.read().await;
        inner
            .records
            .get(&id)
            .map(|record| Stored::new(id, record.clone()))
            .ok_or(StoreError::NotFound { kind: R::KIND, id })
    }

    async fn create(&self, record: R) -> Result<Stored<R>> {
        // Check and insert under one guard so racing creators cannot both
        // pass the duplicate check.
        let mut inner = self.inner.write().await;
        match inner.insert(record) {
            Ok(stored) => {
                metrics::counter!("records_created_total", "kind" => R::KIND).increment(1);
                tracing::debug!(kind = R::KIND, id = %stored.id, "record created");
                Ok(stored)
            }
            Err(err) => {
                metrics::counter!("record_conflicts_total", "kind" => R::KIND).increment(1);
                Err(err)
            }
        }
    }

    async fn list(&self, query: RecordQuery) -> Result<Vec<Stored<R>>> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .skip(query.skip)
            .take(query.limit)
            .map(|(id, record)| Stored::new(*id, record.clone()))
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Stored<R>>> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .find(|(_, record)| record.same_name(name))
            .map(|(id, record)| Stored::new(*id, record.clone())))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.records.len())
    }

    async fn clear(&self) -> Result<usize> {
        let mut inner = self.inner.write().await;
        let removed = inner.records.len();
        inner.records.clear();
        tracing::debug!(kind = R::KIND, removed, "store cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Gadget {
        name: String,
    }

    impl Record for Gadget {
        const KIND: &'static str = "Gadget";

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn gadget(name: &str) -> Gadget {
        Gadget {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store: InMemoryRecordStore<Gadget> = InMemoryRecordStore::new();

        let first = store.create(gadget("Batarang")).await.unwrap();
        let second = store.create(gadget("Grappling Hook")).await.unwrap();

        assert_eq!(first.id, RecordId::new(1));
        assert_eq!(second.id, RecordId::new(2));
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn get_returns_stored_record() {
        let store: InMemoryRecordStore<Gadget> = InMemoryRecordStore::new();
        let created = store.create(gadget("Batarang")).await.unwrap();

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, created);

        // Repeated reads are stable.
        assert_eq!(store.get(created.id).await.unwrap(), fetched);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store: InMemoryRecordStore<Gadget> = InMemoryRecordStore::new();

        let err = store.get(RecordId::new(99)).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                kind: "Gadget",
                id: RecordId::new(99)
            }
        );
        assert!(err.to_string().contains("99"));
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict_and_store_unchanged() {
        let store: InMemoryRecordStore<Gadget> = InMemoryRecordStore::new();
        store.create(gadget("Smoke Pellet")).await.unwrap();

        let err = store.create(gadget("SMOKE pellet")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Conflict { ref name, existing, .. }
                if name == "SMOKE pellet" && existing == RecordId::new(1)
        ));
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.next_id().await, RecordId::new(2));
    }

    #[tokio::test]
    async fn clear_removes_everything_without_reusing_ids() {
        let store: InMemoryRecordStore<Gadget> = InMemoryRecordStore::new();
        let created = store.create(gadget("Batarang")).await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 1);
        assert!(matches!(
            store.get(created.id).await,
            Err(StoreError::NotFound { .. })
        ));

        let recreated = store.create(gadget("Batarang")).await.unwrap();
        assert_eq!(recreated.id, RecordId::new(2));
    }

    #[tokio::test]
    async fn list_respects_window() {
        let store: InMemoryRecordStore<Gadget> = InMemoryRecordStore::new();
        for name in ["A", "B", "C", "D"] {
            store.create(gadget(name)).await.unwrap();
        }

        let page = store
            .list(RecordQuery::new().skip(1).limit(2))
            .await
            .unwrap();
        let names: Vec<_> = page.iter().map(|s| s.record.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);

        let past_end = store.list(RecordQuery::new().skip(10)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn find_by_name_ignores_case() {
        let store: InMemoryRecordStore<Gadget> = InMemoryRecordStore::new();
        store.create(gadget("Explosive Gel")).await.unwrap();

        let found = store.find_by_name("explosive gel").await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(RecordId::new(1)));
        assert!(store.find_by_name("Batarang").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn with_records_seeds_in_order() {
        let store =
            InMemoryRecordStore::with_records([gadget("Batarang"), gadget("Grappling Hook")])
                .unwrap();

        assert_eq!(store.get(RecordId::new(2)).await.unwrap().record.name, "Grappling Hook");
        assert_eq!(store.next_id().await, RecordId::new(3));
    }

    #[test]
    fn with_records_rejects_duplicate_seeds() {
        let result = InMemoryRecordStore::with_records([gadget("Batarang"), gadget("batarang")]);
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
    }

    #[tokio::test]
    async fn concurrent_creates_of_same_name_insert_once() {
        let store: InMemoryRecordStore<Gadget> = InMemoryRecordStore::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let name = if i % 2 == 0 { "Selina Kyle" } else { "selina kyle" };
                tokio::spawn(async move { store.create(gadget(name)).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}

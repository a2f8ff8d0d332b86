//! In-memory document store, used for local development and tests

use super::{new_document_id, Document, DocumentStore, Fields, Filter, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Entry {
    document: Document,
    /// Insertion sequence; breaks ties between equal timestamps
    seq: u64,
}

#[derive(Debug, Default)]
struct Collections {
    next_seq: u64,
    by_name: HashMap<String, HashMap<String, Entry>>,
}

/// Document store backed by a process-local map
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.inner
            .read()
            .await
            .by_name
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

fn sorted(mut entries: Vec<&Entry>) -> Vec<Document> {
    entries.sort_by_key(|entry| (entry.document.created_at, entry.seq));
    entries.into_iter().map(|entry| entry.document.clone()).collect()
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_name
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|entry| entry.document.clone()))
    }

    async fn get_documents(&self, collection: &str, ids: &[String]) -> StoreResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let Some(docs) = inner.by_name.get(collection) else {
            return Ok(Vec::new());
        };
        let mut seen = HashSet::new();
        let entries = ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| docs.get(id))
            .collect();
        Ok(sorted(entries))
    }

    async fn query_documents(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Document>> {
        let inner = self.inner.read().await;
        let Some(docs) = inner.by_name.get(collection) else {
            return Ok(Vec::new());
        };
        let entries = docs
            .values()
            .filter(|entry| filters.iter().all(|f| f.matches(&entry.document.fields)))
            .collect();
        Ok(sorted(entries))
    }

    async fn create_document(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        let id = new_document_id();
        self.set_document(collection, &id, fields).await?;
        Ok(id)
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;

        let now = Utc::now();
        let docs = inner.by_name.entry(collection.to_string()).or_default();
        match docs.get_mut(id) {
            Some(entry) => {
                entry.document.fields = fields;
                entry.document.updated_at = now;
            }
            None => {
                docs.insert(
                    id.to_string(),
                    Entry {
                        document: Document {
                            id: id.to_string(),
                            fields,
                            created_at: now,
                            updated_at: now,
                        },
                        seq,
                    },
                );
            }
        }
        Ok(())
    }

    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .by_name
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        entry.document.fields.extend(fields);
        entry.document.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .by_name
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

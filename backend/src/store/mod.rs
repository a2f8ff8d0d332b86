//! Document store abstraction
//!
//! All persistence goes through [`DocumentStore`]: schemaless JSON documents
//! grouped into collections, addressed by string ids, filtered by simple
//! equality/membership predicates on top-level fields. Updates are shallow
//! merges with last-writer-wins semantics; there are no transactions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgDocumentStore;

/// Top-level fields of a document
pub type Fields = Map<String, Value>;

/// A stored document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Predicate on a top-level field
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    In(String, Vec<Value>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn is_in<V: Into<Value>>(field: &str, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In(field.to_string(), values.into_iter().map(Into::into).collect())
    }

    /// Evaluate against a document's fields. Missing fields never match.
    pub fn matches(&self, fields: &Fields) -> bool {
        match self {
            Filter::Eq(field, expected) => fields.get(field) == Some(expected),
            Filter::In(field, candidates) => fields
                .get(field)
                .is_some_and(|value| candidates.contains(value)),
        }
    }
}

/// Document store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Fetch every listed document that exists; missing ids are skipped
    async fn get_documents(&self, collection: &str, ids: &[String]) -> StoreResult<Vec<Document>>;

    /// Documents matching all filters, oldest first
    async fn query_documents(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Document>>;

    /// Insert a document under a generated id
    async fn create_document(&self, collection: &str, fields: Fields) -> StoreResult<String>;

    /// Insert or overwrite a document under a caller-chosen id
    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    /// Merge `fields` into the document's top-level fields
    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
}

pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

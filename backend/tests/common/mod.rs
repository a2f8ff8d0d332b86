//! Common test utilities for integration tests
//!
//! [`TestApp`] drives the router in-process against a [`RecordingStore`],
//! which counts every write and can be told to fail writes to a collection.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use wellness_backend::{
    config::AppConfig,
    routes,
    services::ErrorReporter,
    state::AppState,
    store::{Document, DocumentStore, Fields, Filter, InMemoryStore, StoreError, StoreResult},
};

/// Kind of write seen by [`RecordingStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Set,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub op: WriteOp,
    pub collection: String,
    pub id: Option<String>,
}

/// In-memory store that records writes and can inject failures
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    writes: Mutex<Vec<Write>>,
    fail_on: Mutex<Option<(WriteOp, String)>>,
}

impl RecordingStore {
    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn count(&self, op: WriteOp, collection: &str) -> usize {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.op == op && w.collection == collection)
            .count()
    }

    /// Forget writes made so far, e.g. after seeding
    pub fn reset(&self) {
        self.writes.lock().unwrap().clear();
    }

    /// Make every `op` on `collection` fail from now on
    pub fn fail_on(&self, op: WriteOp, collection: &str) {
        *self.fail_on.lock().unwrap() = Some((op, collection.to_string()));
    }

    fn record(&self, op: WriteOp, collection: &str, id: Option<&str>) -> StoreResult<()> {
        let failing = self
            .fail_on
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|(fail_op, fail_collection)| *fail_op == op && fail_collection == collection);
        if failing {
            return Err(StoreError::Unavailable(format!("{op:?} on {collection} rejected")));
        }
        self.writes.lock().unwrap().push(Write {
            op,
            collection: collection.to_string(),
            id: id.map(str::to_string),
        });
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.inner.get_document(collection, id).await
    }

    async fn get_documents(&self, collection: &str, ids: &[String]) -> StoreResult<Vec<Document>> {
        self.inner.get_documents(collection, ids).await
    }

    async fn query_documents(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Document>> {
        self.inner.query_documents(collection, filters).await
    }

    async fn create_document(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        self.record(WriteOp::Create, collection, None)?;
        self.inner.create_document(collection, fields).await
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.record(WriteOp::Set, collection, Some(id))?;
        self.inner.set_document(collection, id, fields).await
    }

    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.record(WriteOp::Update, collection, Some(id))?;
        self.inner.update_document(collection, id, fields).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.record(WriteOp::Delete, collection, Some(id))?;
        self.inner.delete_document(collection, id).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }
}

/// Reporter that keeps what it was told
#[derive(Default)]
pub struct CollectingReporter {
    pub reports: Mutex<Vec<String>>,
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, operation: &str, error: &(dyn std::error::Error + 'static)) {
        self.reports
            .lock()
            .unwrap()
            .push(format!("{operation}: {error}"));
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Arc<RecordingStore>,
    pub reporter: Arc<CollectingReporter>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(RecordingStore::default());
        let reporter = Arc::new(CollectingReporter::default());
        let state = AppState::new(store.clone(), AppConfig::default())
            .with_reporter(reporter.clone());
        let app = routes::create_router(state);

        Self {
            app,
            store,
            reporter,
        }
    }

    /// Insert a document directly, bypassing the API, and forget the write
    pub async fn seed<T: Serialize>(&self, collection: &str, value: &T) -> String {
        let fields = match serde_json::to_value(value).unwrap() {
            Value::Object(fields) => fields,
            other => panic!("seed value must be an object, got {other}"),
        };
        let id = self.store.create_document(collection, fields).await.unwrap();
        self.store.reset();
        id
    }

    /// Insert a document under a fixed id
    pub async fn seed_with_id<T: Serialize>(&self, collection: &str, id: &str, value: &T) {
        let fields = match serde_json::to_value(value).unwrap() {
            Value::Object(fields) => fields,
            other => panic!("seed value must be an object, got {other}"),
        };
        self.store.set_document(collection, id, fields).await.unwrap();
        self.store.reset();
    }

    pub async fn request(&self, method: &str, path: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
        };

        (status, value)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request("GET", path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.request("POST", path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.request("PUT", path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.request("PATCH", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.request("DELETE", path, None).await
    }
}

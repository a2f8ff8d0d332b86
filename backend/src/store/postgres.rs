//! PostgreSQL document store
//!
//! Documents live in a single `documents` table keyed by `(collection, id)`
//! with the fields in a JSONB column. Filters compile to JSONB operators.

use super::{new_document_id, Document, DocumentStore, Fields, Filter, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::warn;

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    fields: Json<Fields>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            fields: row.fields.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Document store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::Eq(field, value) => {
            builder.push(" AND fields -> ");
            builder.push_bind(field.clone());
            builder.push(" = ");
            builder.push_bind(Json(value.clone()));
        }
        Filter::In(field, values) => {
            builder.push(" AND ");
            builder.push_bind(Json(Value::Array(values.clone())));
            builder.push(" @> jsonb_build_array(fields -> ");
            builder.push_bind(field.clone());
            builder.push(")");
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, fields, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    async fn get_documents(&self, collection: &str, ids: &[String]) -> StoreResult<Vec<Document>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, fields, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND id = ANY($2)
            ORDER BY created_at, id
            "#,
        )
        .bind(collection)
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn query_documents(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Document>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, fields, created_at, updated_at FROM documents WHERE collection = ",
        );
        builder.push_bind(collection.to_string());
        for filter in filters {
            push_filter(&mut builder, filter);
        }
        builder.push(" ORDER BY created_at, id");

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn create_document(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        let id = new_document_id();
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, fields)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, fields)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET fields = EXCLUDED.fields, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET fields = fields || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!("Database health check failed: {}", e);
                StoreError::Unavailable(e.to_string())
            })
    }
}

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use crate::models::{Document, Fields};

use super::{DocumentStore, SortOrder, StoreError, new_document_id};

/// Postgres-backed store: one `documents` table, JSONB field sets.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    fields: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id, row.fields.0)
    }
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and apply the embedded migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::new(pool))
    }
}

/// Sort expression for `field`, written with the field name as a literal so
/// it matches the expression indexes in the migrations.
fn order_expression(field: &str) -> Result<String, StoreError> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(StoreError::InvalidField(field.to_string()));
    }
    Ok(format!("(fields ->> '{field}') COLLATE \"C\""))
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "INSERT INTO documents (collection, id, fields) VALUES ($1, $2, $3)
             RETURNING id, fields",
        )
        .bind(collection)
        .bind(new_document_id())
        .bind(Json(&fields))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, fields FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn list_ordered(
        &self,
        collection: &str,
        order_by: &str,
        order: SortOrder,
    ) -> Result<Vec<Document>, StoreError> {
        let sort_key = order_expression(order_by)?;
        let order = order.as_sql();
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT id, fields FROM documents
             WHERE collection = $1
             ORDER BY {sort_key} {order} NULLS LAST, id {order}"
        ))
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn update_merge(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "UPDATE documents SET fields = fields || $3
             WHERE collection = $1 AND id = $2
             RETURNING id, fields",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(&patch))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

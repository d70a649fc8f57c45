//! Document store abstraction and the collection-level query helpers built
//! on top of it.
//!
//! Handlers never talk to a backend directly: they go through
//! [`contacts`] and [`projects`], which fix the collection name and ordering
//! field, and those go through the [`DocumentStore`] trait.

pub mod contacts;
pub mod memory;
pub mod postgres;
pub mod projects;

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::models::{Document, Fields};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

const DOCUMENT_ID_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    Migration(sqlx::migrate::MigrateError),
    /// A field name that cannot be used for ordering.
    InvalidField(String),
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "{err}"),
            StoreError::Migration(err) => write!(f, "{err}"),
            StoreError::InvalidField(field) => write!(f, "Invalid field name: {field}"),
            StoreError::Unavailable(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            StoreError::Migration(err) => Some(err),
            StoreError::InvalidField(_) | StoreError::Unavailable(_) => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migration(err)
    }
}

/// A schemaless, per-collection document database.
///
/// Every method is a single atomic operation at the backend. `update_merge`
/// and `delete_by_id` report a missing document themselves (`None` /
/// `false`) so callers never need a separate existence check.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Insert a new document under a fresh store-assigned id.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError>;

    async fn get_by_id(&self, collection: &str, id: &str)
    -> Result<Option<Document>, StoreError>;

    /// All documents in `collection`, ordered by the string value of
    /// `order_by`. Documents missing the field sort last.
    async fn list_ordered(
        &self,
        collection: &str,
        order_by: &str,
        order: SortOrder,
    ) -> Result<Vec<Document>, StoreError>;

    /// Merge `patch` into an existing document, field by field. Returns the
    /// merged document, or `None` if it does not exist. Never upserts.
    async fn update_merge(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, StoreError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError>;
}

/// Generate a 20 character alphanumeric document id.
pub fn new_document_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LEN)
        .map(char::from)
        .collect()
}

use chrono::{DateTime, Utc};

use crate::models::project::{self, CREATED_AT};
use crate::models::{Document, Fields};

use super::{DocumentStore, SortOrder, StoreError};

pub const COLLECTION: &str = "projects";

/// Newest first.
pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
    store
        .list_ordered(COLLECTION, CREATED_AT, SortOrder::Desc)
        .await
}

pub async fn find_by_id(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<Option<Document>, StoreError> {
    store.get_by_id(COLLECTION, id).await
}

/// Insert a project and return it as re-read from the store.
pub async fn create(
    store: &dyn DocumentStore,
    fields: Fields,
    now: DateTime<Utc>,
) -> Result<Document, StoreError> {
    let inserted = store
        .insert(COLLECTION, project::stamp_new(fields, now))
        .await?;
    // A concurrent delete can win the race; hand back what was written.
    Ok(store
        .get_by_id(COLLECTION, &inserted.id)
        .await?
        .unwrap_or(inserted))
}

/// Merge `patch` into an existing project. `None` if it does not exist.
pub async fn update(
    store: &dyn DocumentStore,
    id: &str,
    patch: Fields,
    now: DateTime<Utc>,
) -> Result<Option<Document>, StoreError> {
    store
        .update_merge(COLLECTION, id, project::stamp_update(patch, now))
        .await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
    store.delete_by_id(COLLECTION, id).await
}

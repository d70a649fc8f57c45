use crate::models::{ContactSubmission, Document};

use super::{DocumentStore, SortOrder, StoreError};

pub const COLLECTION: &str = "contacts";
const ORDER_FIELD: &str = "timestamp";

pub async fn create(
    store: &dyn DocumentStore,
    submission: &ContactSubmission,
) -> Result<Document, StoreError> {
    store.insert(COLLECTION, submission.to_fields()).await
}

/// Newest first.
pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
    store
        .list_ordered(COLLECTION, ORDER_FIELD, SortOrder::Desc)
        .await
}

pub async fn find_by_id(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<Option<Document>, StoreError> {
    store.get_by_id(COLLECTION, id).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
    store.delete_by_id(COLLECTION, id).await
}

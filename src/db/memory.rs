use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::models::{Document, Fields};

use super::{DocumentStore, SortOrder, StoreError, new_document_id};

/// Process-local store. Each operation holds the collection's shard lock for
/// its whole duration, so operations on one collection are atomic.
#[derive(Default)]
pub struct MemoryDocumentStore {
    /// collection -> (id -> fields)
    collections: DashMap<String, HashMap<String, Fields>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn sort_key<'a>(fields: &'a Fields, order_by: &str) -> Option<&'a str> {
    fields.get(order_by).and_then(Value::as_str)
}

fn compare(a: &Document, b: &Document, order_by: &str, order: SortOrder) -> Ordering {
    let by_field = match (sort_key(&a.fields, order_by), sort_key(&b.fields, order_by)) {
        (Some(x), Some(y)) => match order {
            SortOrder::Asc => x.cmp(y),
            SortOrder::Desc => y.cmp(x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_field.then_with(|| match order {
        SortOrder::Asc => a.id.cmp(&b.id),
        SortOrder::Desc => b.id.cmp(&a.id),
    })
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        let mut id = new_document_id();
        while docs.contains_key(&id) {
            id = new_document_id();
        }
        docs.insert(id.clone(), fields.clone());
        Ok(Document::new(id, fields))
    }

    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collections.get(collection).and_then(|docs| {
            docs.get(id)
                .map(|fields| Document::new(id, fields.clone()))
        }))
    }

    async fn list_ordered(
        &self,
        collection: &str,
        order_by: &str,
        order: SortOrder,
    ) -> Result<Vec<Document>, StoreError> {
        let mut documents: Vec<Document> = match self.collections.get(collection) {
            Some(docs) => docs
                .iter()
                .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                .collect(),
            None => Vec::new(),
        };
        documents.sort_by(|a, b| compare(a, b, order_by, order));
        Ok(documents)
    }

    async fn update_merge(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, StoreError> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(fields) = docs.get_mut(id) else {
            return Ok(None);
        };
        for (key, value) in patch {
            fields.insert(key, value);
        }
        Ok(Some(Document::new(id, fields.clone())))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        Ok(self
            .collections
            .get_mut(collection)
            .is_some_and(|mut docs| docs.remove(id).is_some()))
    }
}

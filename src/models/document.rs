use serde::Serialize;
use serde_json::{Map, Value};

/// Field set of a stored document.
pub type Fields = Map<String, Value>;

/// A schemaless document as returned by a [`DocumentStore`](crate::db::DocumentStore).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Flatten into a single JSON object: the stored fields plus `id`.
    pub fn into_json(self) -> Value {
        let mut object = self.fields;
        object.insert("id".to_string(), Value::String(self.id));
        Value::Object(object)
    }
}

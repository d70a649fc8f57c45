//! The `{success, message, data, count, error, errors}` wrapper every JSON
//! response is sent in.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::validation::FieldError;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T = Value> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> Envelope<T> {
    fn empty(success: bool) -> Self {
        Self {
            success,
            message: None,
            data: None,
            count: None,
            error: None,
            errors: None,
        }
    }

    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(true)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> Envelope<Vec<T>> {
    /// A list response; `count` always equals the list length.
    pub fn collection(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            data: Some(items),
            count: Some(count),
            ..Self::empty(true)
        }
    }
}

impl Envelope {
    /// Success with only a confirmation message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::empty(true).with_message(message)
    }

    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::empty(false).with_message(message)
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

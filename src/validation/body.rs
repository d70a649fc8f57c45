use axum::Json;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::error::AppError;

use super::FieldError;

/// JSON request body whose parse failures answer with the validation
/// envelope instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected request body: {rejection}");
                AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
            })?;
        Ok(JsonBody(value))
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::envelope::Envelope;
use crate::validation::FieldError;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(Vec<FieldError>),
    /// A document store failure. `message` names the failed operation and
    /// `detail` is what the caller sees as `error`.
    Store { message: String, detail: String },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Validation(errors) => {
                write!(f, "Validation failed: {}", summarize(errors))
            }
            AppError::Store { message, detail } => write!(f, "{message}: {detail}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<Vec<FieldError>> for AppError {
    fn from(errors: Vec<FieldError>) -> Self {
        AppError::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, Envelope::failure(msg.clone(), msg)),
            AppError::Validation(errors) => {
                tracing::debug!("Validation failed: {}", summarize(&errors));
                (
                    StatusCode::BAD_REQUEST,
                    Envelope::failure("Validation failed", summarize(&errors)).with_errors(errors),
                )
            }
            AppError::Store { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Envelope::failure(message, detail),
            ),
        };

        (status, body).into_response()
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

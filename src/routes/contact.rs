//! Contact form submissions.
//!
//! `POST` is public. The read and delete routes are meant for the site owner
//! but are not access-controlled.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::db;
use crate::envelope::Envelope;
use crate::error::AppError;
use crate::metadata;
use crate::models::{ContactForm, ContactReceipt, ContactSubmission, Document, timestamp};
use crate::state::SharedState;
use crate::validation::{self, JsonBody, ResourceKind};

const NOT_FOUND: &str = "Contact submission not found";

pub async fn create(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Envelope<ContactReceipt>), AppError> {
    let form: ContactForm = validation::validate_into(ResourceKind::Contact, &body)?;
    let meta = metadata::extract(&headers, Some(addr.ip()), &state.config.trusted_proxies);
    let submission = ContactSubmission::new(form, meta, timestamp::now());

    let doc = db::contacts::create(state.store(), &submission)
        .await
        .map_err(|e| state.store_failure("Failed to send message. Please try again.", e))?;

    tracing::info!(id = %doc.id, "Contact submission received");

    Ok((
        StatusCode::CREATED,
        Envelope::data(ContactReceipt::new(doc.id, &submission))
            .with_message("Message sent successfully!"),
    ))
}

pub async fn list(State(state): State<SharedState>) -> Result<Envelope<Vec<Value>>, AppError> {
    let contacts = db::contacts::list(state.store())
        .await
        .map_err(|e| state.store_failure("Failed to fetch contacts", e))?;
    Ok(Envelope::collection(
        contacts.into_iter().map(Document::into_json).collect(),
    ))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Envelope, AppError> {
    let contact = db::contacts::find_by_id(state.store(), &id)
        .await
        .map_err(|e| state.store_failure("Failed to fetch contact", e))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    Ok(Envelope::data(contact.into_json()))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Envelope, AppError> {
    let deleted = db::contacts::delete(state.store(), &id)
        .await
        .map_err(|e| state.store_failure("Failed to delete contact submission", e))?;
    if !deleted {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!(%id, "Contact submission deleted");
    Ok(Envelope::message("Contact submission deleted successfully"))
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;

use crate::db;
use crate::envelope::Envelope;
use crate::error::AppError;
use crate::models::{Document, timestamp};
use crate::state::SharedState;
use crate::validation::{self, JsonBody, ResourceKind};

const NOT_FOUND: &str = "Project not found";

pub async fn list(State(state): State<SharedState>) -> Result<Envelope<Vec<Value>>, AppError> {
    let projects = db::projects::list(state.store())
        .await
        .map_err(|e| state.store_failure("Failed to fetch projects", e))?;
    Ok(Envelope::collection(
        projects.into_iter().map(Document::into_json).collect(),
    ))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Envelope, AppError> {
    let project = db::projects::find_by_id(state.store(), &id)
        .await
        .map_err(|e| state.store_failure("Failed to fetch project", e))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    Ok(Envelope::data(project.into_json()))
}

pub async fn create(
    State(state): State<SharedState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Envelope), AppError> {
    let fields = validation::validate(ResourceKind::Project, &body)?;

    let project = db::projects::create(state.store(), fields, timestamp::now())
        .await
        .map_err(|e| state.store_failure("Failed to create project", e))?;

    tracing::info!(id = %project.id, "Project created");

    Ok((
        StatusCode::CREATED,
        Envelope::data(project.into_json()).with_message("Project created successfully"),
    ))
}

/// Field-level merge. Omitted fields keep their stored values.
pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Envelope, AppError> {
    let patch = validation::validate(ResourceKind::ProjectPatch, &body)?;

    let project = db::projects::update(state.store(), &id, patch, timestamp::now())
        .await
        .map_err(|e| state.store_failure("Failed to update project", e))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    tracing::info!(%id, "Project updated");

    Ok(Envelope::data(project.into_json()).with_message("Project updated successfully"))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Envelope, AppError> {
    let deleted = db::projects::delete(state.store(), &id)
        .await
        .map_err(|e| state.store_failure("Failed to delete project", e))?;
    if !deleted {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }

    tracing::info!(%id, "Project deleted");
    Ok(Envelope::message("Project deleted successfully"))
}

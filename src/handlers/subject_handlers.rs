use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use crate::AppState;
use crate::dto::{CreateSubjectDto, UpdateSubjectDto};
use crate::errors::ApiError;
use crate::models::Subject;

/// Handler for listing all subjects
///
/// This function handles GET requests to `/subjects`.
///
/// ### Arguments
///
/// * `state` - The shared application state
///
/// ### Returns
///
/// All subjects as JSON
pub async fn list_subjects_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Subject>>, ApiError> {
    let subjects = state.store.list_subjects().await?;
    Ok(Json(subjects))
}

/// Handler for creating a new subject
///
/// This function handles POST requests to `/subjects`.
///
/// ### Arguments
///
/// * `state` - The shared application state
/// * `payload` - The request payload containing the subject fields
///
/// ### Returns
///
/// The newly created subject as JSON
pub async fn create_subject_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSubjectDto>,
) -> Result<Json<Subject>, ApiError> {
    let subject = state.store.insert_subject(&payload).await?;
    info!(subject = %subject.id, "Subject created");
    Ok(Json(subject))
}

/// Handler for updating a subject
///
/// This function handles PATCH requests to `/subjects/{id}`. Absent
/// fields are left unchanged.
pub async fn update_subject_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSubjectDto>,
) -> Result<Json<Subject>, ApiError> {
    let subject = state.store.update_subject(&id, &payload).await?;
    Ok(Json(subject))
}

/// Handler for deleting a subject
///
/// This function handles DELETE requests to `/subjects/{id}`.
pub async fn delete_subject_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_subject(&id).await?;
    info!(subject = %id, "Subject deleted");
    Ok(StatusCode::NO_CONTENT)
}

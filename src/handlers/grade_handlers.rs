use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tracing::info;

use crate::AppState;
use crate::dto::{SaveGradeFieldDto, SavedGradeFieldDto};
use crate::errors::ApiError;
use crate::models::GradeRecord;
use crate::reconcile::reconcile;

/// Handler for listing a subject's reconciled grade records
///
/// This function handles GET requests to `/subjects/{id}/grades`. It
/// fetches the subject's grade rows, then the students they reference,
/// and joins them into display records. A grade whose student has
/// vanished gets the sentinel name rather than failing the whole table.
///
/// ### Arguments
///
/// * `state` - The shared application state
/// * `subject_id` - The subject to load grades for, from the URL path
///
/// ### Returns
///
/// One reconciled record per grade row, in the backend's row order
pub async fn list_subject_grades_handler(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<String>,
) -> Result<Json<Vec<GradeRecord>>, ApiError> {
    let grades = state.store.list_grades_for_subject(&subject_id).await?;
    if grades.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let mut student_ids: Vec<String> =
        grades.iter().map(|grade| grade.student_id.clone()).collect();
    student_ids.sort();
    student_ids.dedup();
    let students = state.store.list_students_by_ids(&student_ids).await?;

    Ok(Json(reconcile(&grades, &students)))
}

/// Handler for saving a single term score of a grade row
///
/// This function handles PATCH requests to `/grades/{id}`. Each field is
/// persisted independently, never batched, so editing four cells of one
/// row issues four of these calls. The client's edit token, if any, is
/// echoed back unchanged so the caller can discard stale completions.
///
/// ### Arguments
///
/// * `state` - The shared application state
/// * `grade_id` - The grade row to write, from the URL path
/// * `payload` - The field, its new value (null clears), and the token
///
/// ### Returns
///
/// The saved field as JSON
pub async fn save_grade_field_handler(
    State(state): State<Arc<AppState>>,
    Path(grade_id): Path<String>,
    Json(payload): Json<SaveGradeFieldDto>,
) -> Result<Json<SavedGradeFieldDto>, ApiError> {
    let grade = state
        .store
        .update_grade_field(&grade_id, payload.field, payload.value)
        .await?;
    info!(grade = %grade.id, field = ?payload.field, "Grade field saved");

    Ok(Json(SavedGradeFieldDto {
        grade_id: grade.id,
        field: payload.field,
        value: payload.value,
        edit_token: payload.edit_token,
    }))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use crate::AppState;
use crate::dto::{CreateStudentDto, UpdateStudentDto};
use crate::errors::ApiError;
use crate::models::Student;

/// Checks that a year level is within the 1-4 range
fn validate_year_level(year_level: i32) -> Result<(), ApiError> {
    if !(1..=4).contains(&year_level) {
        return Err(ApiError::InvalidYearLevel(
            "Year level must be between 1 and 4".to_string(),
        ));
    }
    Ok(())
}

/// Handler for listing all students
///
/// This function handles GET requests to `/students`.
///
/// ### Arguments
///
/// * `state` - The shared application state
///
/// ### Returns
///
/// All students as JSON, newest first
pub async fn list_students_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.store.list_students().await?;
    Ok(Json(students))
}

/// Handler for creating a new student
///
/// This function handles POST requests to `/students`.
///
/// ### Arguments
///
/// * `state` - The shared application state
/// * `payload` - The request payload containing the student fields
///
/// ### Returns
///
/// The newly created student as JSON
pub async fn create_student_handler(
    State(state): State<Arc<AppState>>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreateStudentDto>,
) -> Result<Json<Student>, ApiError> {
    // Validate the year level range before touching the backend
    validate_year_level(payload.year_level)?;

    let student = state.store.insert_student(&payload).await?;
    info!(student = %student.id, "Student created");

    Ok(Json(student))
}

/// Handler for updating a student
///
/// This function handles PATCH requests to `/students/{id}`. Absent
/// fields are left unchanged.
///
/// ### Arguments
///
/// * `state` - The shared application state
/// * `id` - The ID of the student to update, extracted from the URL path
/// * `payload` - The request payload with the fields to change
///
/// ### Returns
///
/// The updated student as JSON
pub async fn update_student_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStudentDto>,
) -> Result<Json<Student>, ApiError> {
    if let Some(year_level) = payload.year_level {
        validate_year_level(year_level)?;
    }

    let student = state.store.update_student(&id, &payload).await?;
    Ok(Json(student))
}

/// Handler for deleting a student
///
/// This function handles DELETE requests to `/students/{id}`. Grade rows
/// referencing the student are the backend's concern, not ours.
pub async fn delete_student_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_student(&id).await?;
    info!(student = %id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}

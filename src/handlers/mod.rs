/// HTTP handlers module
///
/// One file per screen: students, subjects, grades, reports. The root
/// route's about payload lives here.

mod grade_handlers;
mod report_handlers;
mod student_handlers;
mod subject_handlers;

// Re-export all handler functions
pub use grade_handlers::*;
pub use report_handlers::*;
pub use student_handlers::*;
pub use subject_handlers::*;

use axum::Json;

/// Handler for the root route
///
/// This function handles GET requests to `/` and returns service
/// metadata, standing in for the original landing screen.
pub async fn about_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "registrar",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Student grade management with AI performance reports",
    }))
}

//! Registrar: a student grade management service.
//!
//! Registrar exposes the screens of a grade management tool as a JSON
//! API: CRUD for students and subjects, a field-level grade entry
//! surface, and an AI-generated performance report that can be rendered
//! to PDF. Persistence lives in an external hosted backend and AI
//! reasoning in an external text-generation endpoint; this crate is the
//! thin service layer in between.
//!
//! ### Modules
//!
//! - `config`: Layered configuration (defaults, TOML file, CLI/env args)
//! - `models`: Backend rows and the transient types derived from them
//! - `store`: HTTP client wrapper for the hosted backend
//! - `reconcile`: Joins grade rows with student names
//! - `report`: AI report generation with a deterministic fallback
//! - `render`: PDF layout for the generated report
//! - `handlers`: Axum handlers, one file per screen
//!
//! ### Web API
//!
//! - `GET /`: Service metadata
//! - `GET|POST /students`, `PATCH|DELETE /students/{id}`
//! - `GET|POST /subjects`, `PATCH|DELETE /subjects/{id}`
//! - `GET /subjects/{id}/grades`: Reconciled grade table
//! - `PATCH /grades/{id}`: Save one term score
//! - `POST /subjects/{id}/report`: Generate the AI report
//! - `POST /subjects/{id}/report/pdf`: Generate and render the report

/// Configuration management module
pub mod config;

/// Data transfer objects for the web API
pub mod dto;

/// API error types
pub mod errors;

/// HTTP handlers module
pub mod handlers;

/// Data models module
pub mod models;

/// Grade/student reconciliation module
pub mod reconcile;

/// PDF rendering module
pub mod render;

/// AI report generation module
pub mod report;

/// Hosted-backend client module
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;

use crate::report::ReportGenerator;
use crate::store::StoreClient;

/// Shared application state: the clients for both external collaborators
pub struct AppState {
    /// Client for the hosted backend
    pub store: StoreClient,
    /// Client for the text-generation endpoint
    pub reports: ReportGenerator,
}

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `state` - The shared clients for the hosted backend and the
///   generation API
///
/// ### Returns
///
/// An Axum Router configured with all routes, a permissive CORS layer
/// (the browser screens call this API cross-origin), and the state
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        // Root route: service metadata, the landing screen analog
        .route("/", get(handlers::about_handler))
        // Routes for creating and listing students
        .route(
            "/students",
            get(handlers::list_students_handler).post(handlers::create_student_handler),
        )
        // Routes for updating and deleting a specific student
        .route(
            "/students/{id}",
            patch(handlers::update_student_handler).delete(handlers::delete_student_handler),
        )
        // Routes for creating and listing subjects
        .route(
            "/subjects",
            get(handlers::list_subjects_handler).post(handlers::create_subject_handler),
        )
        // Routes for updating and deleting a specific subject
        .route(
            "/subjects/{id}",
            patch(handlers::update_subject_handler).delete(handlers::delete_subject_handler),
        )
        // Route for the reconciled grade table of one subject
        .route(
            "/subjects/{id}/grades",
            get(handlers::list_subject_grades_handler),
        )
        // Route for saving a single term score
        .route("/grades/{id}", patch(handlers::save_grade_field_handler))
        // Routes for generating the AI report, structured and rendered
        .route(
            "/subjects/{id}/report",
            post(handlers::generate_report_handler),
        )
        .route(
            "/subjects/{id}/report/pdf",
            post(handlers::render_report_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Common test utilities for Registrar integration tests
///
/// This file contains shared functions for all integration tests: a stub
/// hosted backend and a stub generation endpoint, each a small axum
/// router bound to an ephemeral port, plus helpers for building the
/// application under test against them and driving it with requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Query, State},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use registrar::report::ReportGenerator;
use registrar::store::StoreClient;
use registrar::{AppState, create_app};

/// In-memory tables behind the stub backend
#[derive(Default)]
pub struct BackendTables {
    pub students: Vec<Value>,
    pub subjects: Vec<Value>,
    pub grades: Vec<Value>,
    /// When set, every write request fails with a 500
    pub fail_writes: bool,
    next_id: u64,
}

impl BackendTables {
    fn mint_id(&mut self, table: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", table.trim_end_matches('s'), self.next_id)
    }

    fn rows(&self, table: &str) -> Option<&Vec<Value>> {
        match table {
            "students" => Some(&self.students),
            "subjects" => Some(&self.subjects),
            "grades" => Some(&self.grades),
            _ => None,
        }
    }

    fn rows_mut(&mut self, table: &str) -> Option<&mut Vec<Value>> {
        match table {
            "students" => Some(&mut self.students),
            "subjects" => Some(&mut self.subjects),
            "grades" => Some(&mut self.grades),
            _ => None,
        }
    }
}

pub type SharedBackend = Arc<Mutex<BackendTables>>;

/// Whether a row satisfies one `column=op.value` filter
fn filter_matches(row: &Value, column: &str, filter: &str) -> bool {
    let field = row.get(column).and_then(|v| v.as_str()).unwrap_or_default();
    if let Some(value) = filter.strip_prefix("eq.") {
        field == value
    } else if let Some(list) = filter.strip_prefix("in.(") {
        list.trim_end_matches(')').split(',').any(|v| v == field)
    } else {
        true
    }
}

/// Whether a row satisfies every filter in the query string
fn row_matches(row: &Value, params: &HashMap<String, String>) -> bool {
    params
        .iter()
        .filter(|(key, _)| key.as_str() != "select" && key.as_str() != "order")
        .all(|(key, value)| filter_matches(row, key, value))
}

fn write_rejected() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "backend write rejected"})),
    )
        .into_response()
}

async fn stub_select(
    State(db): State<SharedBackend>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    let db = db.lock().unwrap();
    let rows = match db.rows(&table) {
        Some(rows) => rows,
        None => return Json(Vec::new()),
    };
    Json(rows.iter().filter(|row| row_matches(row, &params)).cloned().collect())
}

async fn stub_insert(
    State(db): State<SharedBackend>,
    Path(table): Path<String>,
    Json(mut row): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();
    if db.fail_writes {
        return write_rejected();
    }

    row["id"] = json!(db.mint_id(&table));
    if table == "students" {
        row["created_at"] = json!("2026-01-15T08:30:00Z");
    }

    match db.rows_mut(&table) {
        Some(rows) => rows.push(row.clone()),
        None => return write_rejected(),
    }
    Json(vec![row]).into_response()
}

async fn stub_update(
    State(db): State<SharedBackend>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    Json(patch): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();
    if db.fail_writes {
        return write_rejected();
    }

    let rows = match db.rows_mut(&table) {
        Some(rows) => rows,
        None => return write_rejected(),
    };

    let mut updated = Vec::new();
    for row in rows.iter_mut() {
        if row_matches(row, &params) {
            if let (Some(object), Some(changes)) = (row.as_object_mut(), patch.as_object()) {
                for (key, value) in changes {
                    object.insert(key.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }
    }
    Json(updated).into_response()
}

async fn stub_delete(
    State(db): State<SharedBackend>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut db = db.lock().unwrap();
    if db.fail_writes {
        return write_rejected();
    }

    if let Some(rows) = db.rows_mut(&table) {
        rows.retain(|row| !row_matches(row, &params));
    }
    Json(Vec::<Value>::new()).into_response()
}

/// Binds a router to an ephemeral local port and serves it in the background
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Starts the stub backend and hands back its address and tables
pub async fn spawn_backend() -> (SocketAddr, SharedBackend) {
    let db: SharedBackend = Arc::new(Mutex::new(BackendTables::default()));
    let router = Router::new()
        .route(
            "/rest/v1/{table}",
            axum::routing::get(stub_select)
                .post(stub_insert)
                .patch(stub_update)
                .delete(stub_delete),
        )
        .with_state(db.clone());
    (spawn_server(router).await, db)
}

/// Starts a stub generation endpoint that always answers with `text`
pub async fn spawn_ai_stub(text: &str) -> SocketAddr {
    let text = text.to_string();
    let router = Router::new().route(
        "/v1beta/models/{model}",
        axum::routing::post(move || {
            let text = text.clone();
            async move {
                Json(json!({
                    "candidates": [{"content": {"parts": [{"text": text}]}}]
                }))
            }
        }),
    );
    spawn_server(router).await
}

/// Starts a stub generation endpoint that always fails with a 500
pub async fn spawn_ai_failure() -> SocketAddr {
    let router = Router::new().route(
        "/v1beta/models/{model}",
        axum::routing::post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    spawn_server(router).await
}

/// An address nothing is listening on, for simulating network failures
pub async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Builds the application under test against the given stub servers
pub fn build_app(backend: SocketAddr, ai: SocketAddr) -> Router {
    let state = Arc::new(AppState {
        store: StoreClient::new(format!("http://{}", backend), "test-key".to_string()),
        reports: ReportGenerator::new(
            format!("http://{}", ai),
            "test-key".to_string(),
            "gemini-1.5-flash".to_string(),
        ),
    });
    create_app(state)
}

/// Sends one request to the app and parses the JSON response body
///
/// An empty body (e.g. a 204) parses as `Value::Null`.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Sends one request and returns the raw response body and content type
pub async fn send_raw(app: &Router, method: &str, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, bytes.to_vec())
}

/// Seeds a student row directly into the stub backend
pub fn seed_student(db: &SharedBackend, id: &str, first_name: &str, last_name: &str) {
    db.lock().unwrap().students.push(json!({
        "id": id,
        "student_number": format!("2023-{}", id),
        "first_name": first_name,
        "last_name": last_name,
        "course": "BSIT",
        "year_level": 3,
        "created_at": "2026-01-15T08:30:00Z",
    }));
}

/// Seeds a subject row directly into the stub backend
pub fn seed_subject(db: &SharedBackend, id: &str, code: &str, name: &str) {
    db.lock().unwrap().subjects.push(json!({
        "id": id,
        "subject_code": code,
        "subject_name": name,
        "instructor": "R. Santos",
    }));
}

/// Seeds a grade row directly into the stub backend
pub fn seed_grade(
    db: &SharedBackend,
    id: &str,
    student_id: &str,
    subject_id: &str,
    scores: [Option<f64>; 4],
) {
    let [prelim, midterm, semifinal, final_term] = scores;
    db.lock().unwrap().grades.push(json!({
        "id": id,
        "student_id": student_id,
        "subject_id": subject_id,
        "prelim": prelim,
        "midterm": midterm,
        "semifinal": semifinal,
        "final": final_term,
    }));
}

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::dto::{CreateStudentDto, CreateSubjectDto, UpdateStudentDto, UpdateSubjectDto};
use crate::models::{Grade, Student, Subject, TermField};

/// Error type for store operations
#[derive(Debug)]
pub enum StoreError {
    /// Backend returned an error status with a message body
    Server {
        status: reqwest::StatusCode,
        message: String,
    },
    /// Network/connection/request error
    Request(reqwest::Error),
    /// A write matched no row in the named table
    MissingRow(&'static str),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Server { status, message } => {
                write!(f, "Backend error ({}): {}", status.as_u16(), message)
            }
            StoreError::Request(err) => write!(f, "{}", err),
            StoreError::MissingRow(table) => write!(f, "No matching row in {}", table),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Request(err) => Some(err),
            StoreError::Server { .. } | StoreError::MissingRow(_) => None,
        }
    }
}

/// Extension trait for checking HTTP responses and extracting backend error messages
trait ResponseExt {
    /// Checks for error status and extracts the backend's error message body
    async fn check(self) -> Result<reqwest::Response, StoreError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, StoreError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(StoreError::Server { status, message })
    }
}

/// HTTP client wrapper for the hosted backend's REST interface
///
/// Every table lives under `{base}/rest/v1`; filters use the backend's
/// `column=op.value` query syntax. Writes ask for the affected rows back
/// with `Prefer: return=representation`. There is no retry and no
/// transaction: each call stands alone.
pub struct StoreClient {
    /// Root URL of the hosted backend (e.g. "https://xyz.supabase.co")
    base_url: String,
    /// Project API key, sent as both the `apikey` header and bearer token
    api_key: String,
    /// The underlying HTTP client
    client: Client,
}

impl StoreClient {
    /// Creates a new StoreClient
    ///
    /// ### Arguments
    ///
    /// * `base_url` - Root URL of the hosted backend
    /// * `api_key` - The backend project's API key
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            client: Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Builder for a write that returns the affected rows
    fn write(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.request(method, table)
            .header("Prefer", "return=representation")
    }

    /// Extracts the single affected row from a write's representation
    async fn one_row<T: DeserializeOwned>(
        response: reqwest::Response,
        table: &'static str,
    ) -> Result<T, StoreError> {
        let mut rows: Vec<T> = response.json().await.map_err(StoreError::Request)?;
        if rows.is_empty() {
            return Err(StoreError::MissingRow(table));
        }
        Ok(rows.remove(0))
    }

    // ── Student operations ───────────────────────────────────────────

    /// Lists all students, newest first
    pub async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, "students")
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        response.json().await.map_err(StoreError::Request)
    }

    /// Lists the students whose ids appear in `ids`
    pub async fn list_students_by_ids(&self, ids: &[String]) -> Result<Vec<Student>, StoreError> {
        let filter = format!("in.({})", ids.join(","));
        let response = self
            .request(reqwest::Method::GET, "students")
            .query(&[("select", "*"), ("id", filter.as_str())])
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        response.json().await.map_err(StoreError::Request)
    }

    /// Inserts a new student; the backend mints the id and timestamp
    pub async fn insert_student(&self, dto: &CreateStudentDto) -> Result<Student, StoreError> {
        let response = self
            .write(reqwest::Method::POST, "students")
            .json(dto)
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        Self::one_row(response, "students").await
    }

    /// Updates a student; absent fields are left unchanged
    pub async fn update_student(
        &self,
        id: &str,
        dto: &UpdateStudentDto,
    ) -> Result<Student, StoreError> {
        let filter = format!("eq.{}", id);
        let response = self
            .write(reqwest::Method::PATCH, "students")
            .query(&[("id", filter.as_str())])
            .json(dto)
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        Self::one_row(response, "students").await
    }

    /// Deletes a student
    pub async fn delete_student(&self, id: &str) -> Result<(), StoreError> {
        let filter = format!("eq.{}", id);
        self.request(reqwest::Method::DELETE, "students")
            .query(&[("id", filter.as_str())])
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        Ok(())
    }

    // ── Subject operations ───────────────────────────────────────────

    /// Lists all subjects
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, "subjects")
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        response.json().await.map_err(StoreError::Request)
    }

    /// Gets a specific subject by id
    pub async fn get_subject(&self, id: &str) -> Result<Option<Subject>, StoreError> {
        let filter = format!("eq.{}", id);
        let response = self
            .request(reqwest::Method::GET, "subjects")
            .query(&[("select", "*"), ("id", filter.as_str())])
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        let mut rows: Vec<Subject> = response.json().await.map_err(StoreError::Request)?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    /// Inserts a new subject
    pub async fn insert_subject(&self, dto: &CreateSubjectDto) -> Result<Subject, StoreError> {
        let response = self
            .write(reqwest::Method::POST, "subjects")
            .json(dto)
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        Self::one_row(response, "subjects").await
    }

    /// Updates a subject; absent fields are left unchanged
    pub async fn update_subject(
        &self,
        id: &str,
        dto: &UpdateSubjectDto,
    ) -> Result<Subject, StoreError> {
        let filter = format!("eq.{}", id);
        let response = self
            .write(reqwest::Method::PATCH, "subjects")
            .query(&[("id", filter.as_str())])
            .json(dto)
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        Self::one_row(response, "subjects").await
    }

    /// Deletes a subject
    pub async fn delete_subject(&self, id: &str) -> Result<(), StoreError> {
        let filter = format!("eq.{}", id);
        self.request(reqwest::Method::DELETE, "subjects")
            .query(&[("id", filter.as_str())])
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        Ok(())
    }

    // ── Grade operations ─────────────────────────────────────────────

    /// Lists the grade rows recorded for one subject
    pub async fn list_grades_for_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<Grade>, StoreError> {
        let filter = format!("eq.{}", subject_id);
        let response = self
            .request(reqwest::Method::GET, "grades")
            .query(&[("select", "*"), ("subject_id", filter.as_str())])
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        response.json().await.map_err(StoreError::Request)
    }

    /// Writes a single term-score column of one grade row
    ///
    /// Each field saves independently; there is no batching across fields.
    /// A `None` value clears the column.
    pub async fn update_grade_field(
        &self,
        id: &str,
        field: TermField,
        value: Option<f64>,
    ) -> Result<Grade, StoreError> {
        let filter = format!("eq.{}", id);
        let mut body = serde_json::Map::new();
        body.insert(
            field.column().to_string(),
            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        );

        let response = self
            .write(reqwest::Method::PATCH, "grades")
            .query(&[("id", filter.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(StoreError::Request)?
            .check()
            .await?;
        Self::one_row(response, "grades").await
    }
}

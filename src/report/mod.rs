//! AI report generation.
//!
//! The generator is total over its input domain: every failure of the
//! external model (network, error status, malformed or mis-shaped
//! response) resolves to the locally computed fallback report, so callers
//! never see an error from it.

mod extract;

use anyhow::{Context, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{GradeRecord, Report};

/// One student's row as serialized into the prompt
///
/// Scores are the numeric view of a record: absent terms read as zero and
/// the final is the derived value used for pass/fail analysis.
#[derive(Debug, Clone, Serialize)]
struct AnalysisRow {
    name: String,
    prelim: f64,
    midterm: f64,
    semifinal: f64,
    #[serde(rename = "final")]
    final_score: f64,
    passed: bool,
}

impl AnalysisRow {
    fn from_record(record: &GradeRecord) -> Self {
        Self {
            name: record.name.clone(),
            prelim: record.prelim.unwrap_or(0.0),
            midterm: record.midterm.unwrap_or(0.0),
            semifinal: record.semifinal.unwrap_or(0.0),
            final_score: record.final_score(),
            passed: record.passed(),
        }
    }
}

// Wire types for the generation endpoint's generateContent call
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for the external text-generation endpoint
pub struct ReportGenerator {
    /// Root URL of the generation API
    base_url: String,
    /// API key, sent as a request header
    api_key: String,
    /// Model identifier (e.g. "gemini-1.5-flash")
    model: String,
    /// The underlying HTTP client
    client: Client,
}

impl ReportGenerator {
    /// Creates a new ReportGenerator
    ///
    /// ### Arguments
    ///
    /// * `base_url` - Root URL of the generation API
    /// * `api_key` - API key for the generation endpoint
    /// * `model` - Model identifier to request
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            base_url,
            api_key,
            model,
            client: Client::new(),
        }
    }

    /// Generates a performance report for one subject's reconciled records
    ///
    /// Attempts the external model once; any failure substitutes the
    /// deterministic fallback built from the same rows. This function
    /// never errors, including on an empty record list.
    pub async fn generate(&self, subject_name: &str, records: &[GradeRecord]) -> Report {
        let rows: Vec<AnalysisRow> = records.iter().map(AnalysisRow::from_record).collect();

        match self.request_analysis(subject_name, &rows).await {
            Ok(report) => {
                info!(subject = subject_name, "AI analysis succeeded");
                report
            }
            Err(err) => {
                warn!(
                    subject = subject_name,
                    error = %err,
                    "AI analysis failed, substituting fallback report"
                );
                fallback_report(subject_name, &rows)
            }
        }
    }

    /// One attempt against the external model; every failure mode is an error
    async fn request_analysis(
        &self,
        subject_name: &str,
        rows: &[AnalysisRow],
    ) -> anyhow::Result<Report> {
        let prompt = build_prompt(subject_name, rows)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("generation request failed")?
            .error_for_status()
            .context("generation endpoint returned an error status")?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("generation response was not valid JSON")?;
        let text = body
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .ok_or_else(|| anyhow!("generation response contained no candidates"))?;

        extract::parse_report(text)
    }
}

/// Builds the instructional prompt around the serialized grade rows
fn build_prompt(subject_name: &str, rows: &[AnalysisRow]) -> anyhow::Result<String> {
    let data =
        serde_json::to_string_pretty(rows).context("failed to serialize grade rows")?;

    Ok(format!(
        r#"You are an academic assistant. Analyze the following student performance data for the subject: "{subject_name}".

Rules:
- Return ONLY a valid JSON object.
- Do NOT include markdown, explanations, or extra text.
- Use double quotes for strings.
- Final grade >= 75 means "passed", otherwise "failed".

Data format: {{ "name": "string", "prelim": number, "midterm": number, "semifinal": number, "final": number }}

Data:
{data}

Respond with this exact structure:
{{
  "analysis": "A 2-3 sentence summary of overall class performance.",
  "passedStudents": ["Name 1", "Name 2"],
  "failedStudents": ["Name 3"]
}}"#
    ))
}

/// The deterministic report produced when the external model cannot
///
/// Counts and name lists come straight from the rows, preserving their
/// order. This is the contract's guaranteed minimum output.
fn fallback_report(subject_name: &str, rows: &[AnalysisRow]) -> Report {
    let passed: Vec<String> = rows
        .iter()
        .filter(|row| row.passed)
        .map(|row| row.name.clone())
        .collect();
    let failed: Vec<String> = rows
        .iter()
        .filter(|row| !row.passed)
        .map(|row| row.name.clone())
        .collect();

    Report {
        analysis: format!(
            "Performance summary for {}: {} students passed, {} students failed.",
            subject_name,
            passed.len(),
            failed.len()
        ),
        passed_students: passed,
        failed_students: failed,
    }
}

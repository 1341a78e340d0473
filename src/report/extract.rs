//! Parsing of the external model's free-text response.
//!
//! Two stages: a fence-stripping pass that produces the candidate JSON
//! payload, then a strict parse of that payload into the report shape.
//! A missing or mis-typed field fails the parse, and the caller falls
//! back — the external shape is never trusted partially.

use anyhow::Context;

use crate::models::Report;

/// Strips a surrounding markdown code fence, if any
///
/// A response starting with a fence labeled `json` yields the text
/// between that marker and the next fence; a plain fence yields the text
/// between the first and second fence; anything else is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        match rest.find("```") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        }
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        match rest.find("```") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        }
    } else {
        trimmed
    }
}

/// Parses a model response into a report, failing closed on any
/// structural mismatch
pub fn parse_report(text: &str) -> anyhow::Result<Report> {
    let payload = strip_code_fence(text);
    serde_json::from_str(payload).context("model response did not match the report structure")
}


#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str =
        r#"{"analysis":"Strong term.","passedStudents":["Alice Reyes"],"failedStudents":[]}"#;

    #[test]
    fn test_labeled_fence_is_stripped() {
        let wrapped = format!("```json\n{}\n```", PAYLOAD);
        assert_eq!(strip_code_fence(&wrapped), PAYLOAD);
    }

    #[test]
    fn test_plain_fence_is_stripped() {
        let wrapped = format!("```\n{}\n```", PAYLOAD);
        assert_eq!(strip_code_fence(&wrapped), PAYLOAD);
    }

    #[test]
    fn test_text_after_the_closing_fence_is_dropped() {
        let wrapped = format!("```json\n{}\n```\nHope that helps!", PAYLOAD);
        assert_eq!(strip_code_fence(&wrapped), PAYLOAD);
    }

    #[test]
    fn test_unfenced_text_is_only_trimmed() {
        let padded = format!("  {}\n", PAYLOAD);
        assert_eq!(strip_code_fence(&padded), PAYLOAD);
    }

    #[test]
    fn test_unterminated_fence_still_yields_the_payload() {
        let wrapped = format!("```json\n{}", PAYLOAD);
        assert_eq!(strip_code_fence(&wrapped), PAYLOAD);
    }

    #[test]
    fn test_parse_accepts_a_fenced_report() {
        let wrapped = format!("```json\n{}\n```", PAYLOAD);
        let report = parse_report(&wrapped).unwrap();
        assert_eq!(report.analysis, "Strong term.");
        assert_eq!(report.passed_students, vec!["Alice Reyes"]);
    }

    #[test]
    fn test_parse_rejects_non_json_text() {
        assert!(parse_report("Everyone did great this term!").is_err());
    }

    #[test]
    fn test_parse_rejects_a_missing_field() {
        let partial = r#"{"analysis":"ok","passedStudents":[]}"#;
        assert!(parse_report(partial).is_err());
    }

    #[test]
    fn test_parse_rejects_a_mistyped_field() {
        let mistyped =
            r#"{"analysis":"ok","passedStudents":"Alice Reyes","failedStudents":[]}"#;
        assert!(parse_report(mistyped).is_err());
    }

    #[test]
    fn test_parse_tolerates_extra_fields() {
        let extra = r#"{"analysis":"ok","passedStudents":[],"failedStudents":[],"confidence":0.9}"#;
        assert!(parse_report(extra).is_ok());
    }
}

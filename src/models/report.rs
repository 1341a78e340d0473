use serde::{Deserialize, Serialize};

/// The structured performance report for one subject
///
/// Either parsed from the external model's response or built locally as
/// the deterministic fallback. Field names are camelCase on the wire;
/// this is the exact shape the external model is instructed to return.
/// Produced once per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Natural-language summary of overall class performance
    pub analysis: String,

    /// Names of passing students, in grade-row order
    pub passed_students: Vec<String>,

    /// Names of failing students, in grade-row order
    pub failed_students: Vec<String>,
}

use serde::{Deserialize, Serialize};

use crate::models::TermField;

/// Data transfer object for creating a new student
///
/// This struct is used to deserialize JSON requests for creating students,
/// and doubles as the insert body sent to the hosted backend.
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateStudentDto {
    /// School-issued student number
    pub student_number: String,

    /// The student's given name
    pub first_name: String,

    /// The student's family name
    pub last_name: String,

    /// Course or program the student is enrolled in
    pub course: String,

    /// Year level, must be between 1 and 4
    pub year_level: i32,
}

/// Data transfer object for updating a student
///
/// All fields are optional; absent fields are left unchanged on the
/// backend, so they must not serialize as nulls.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct UpdateStudentDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    /// Year level, must be between 1 and 4 when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_level: Option<i32>,
}

/// Data transfer object for creating a new subject
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateSubjectDto {
    /// Short course code (e.g. "IT301")
    pub subject_code: String,

    /// Full subject name
    pub subject_name: String,

    /// Name of the instructor teaching the subject
    pub instructor: String,
}

/// Data transfer object for updating a subject; absent fields are left unchanged
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct UpdateSubjectDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

/// Request body for saving a single term score of a grade row
///
/// `value: null` (or absent) clears the field. The `edit_token` is opaque
/// to the server and echoed back in the response so a client issuing a
/// newer edit can discard a stale in-flight completion.
#[derive(Serialize, Deserialize, Debug)]
pub struct SaveGradeFieldDto {
    /// Which of the four term columns to write
    pub field: TermField,

    /// The new score, or nothing to clear the cell
    #[serde(default)]
    pub value: Option<f64>,

    /// Client-side monotonic token for this field, echoed back unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_token: Option<u64>,
}

/// Response body for a saved term score
#[derive(Serialize, Deserialize, Debug)]
pub struct SavedGradeFieldDto {
    /// The grade row that was written
    pub grade_id: String,

    /// The column that was written
    pub field: TermField,

    /// The value now stored in that column
    pub value: Option<f64>,

    /// The request's edit token, if one was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_token: Option<u64>,
}

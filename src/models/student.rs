use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a student row owned by the hosted backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier, minted by the backend
    pub id: String,

    /// School-issued student number
    pub student_number: String,

    /// The student's given name
    pub first_name: String,

    /// The student's family name
    pub last_name: String,

    /// Course or program the student is enrolled in
    pub course: String,

    /// Year level, between 1 and 4
    pub year_level: i32,

    /// When the row was created, set by the backend
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// The display name used in grade tables and reports
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

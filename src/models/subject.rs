use serde::{Deserialize, Serialize};

/// Represents a subject row owned by the hosted backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier, minted by the backend
    pub id: String,

    /// Short course code (e.g. "IT301")
    pub subject_code: String,

    /// Full subject name
    pub subject_name: String,

    /// Name of the instructor teaching the subject
    pub instructor: String,
}

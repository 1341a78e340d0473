use serde::{Deserialize, Serialize};

/// Represents a grade row: one student's term scores in one subject
///
/// Term scores are nullable on the backend, and an absent score stays
/// absent here rather than collapsing to zero. The `final` column keeps
/// its backend name on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Unique identifier, minted by the backend
    pub id: String,

    /// The student this grade belongs to
    pub student_id: String,

    /// The subject this grade was recorded for
    pub subject_id: String,

    /// Preliminary term score
    pub prelim: Option<f64>,

    /// Midterm score
    pub midterm: Option<f64>,

    /// Semi-final term score
    pub semifinal: Option<f64>,

    /// Final score, if one was stored explicitly
    #[serde(rename = "final")]
    pub final_term: Option<f64>,
}

/// The four writable term-score columns of a grade row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermField {
    Prelim,
    Midterm,
    Semifinal,
    Final,
}

impl TermField {
    /// The backend column name for this field
    pub fn column(&self) -> &'static str {
        match self {
            TermField::Prelim => "prelim",
            TermField::Midterm => "midterm",
            TermField::Semifinal => "semifinal",
            TermField::Final => "final",
        }
    }
}

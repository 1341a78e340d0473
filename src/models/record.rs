use serde::{Deserialize, Serialize};

/// Passing threshold for the derived final score; the boundary itself passes.
pub const PASSING_GRADE: f64 = 75.0;

/// A grade row joined with its student's display name, ready for the
/// grade table and the report pipeline
///
/// Term scores stay optional: an empty cell is empty, not zero. Absent
/// terms are only read as zero at analysis time, inside [`final_score`].
///
/// [`final_score`]: GradeRecord::final_score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// The grade row's identifier
    pub id: String,

    /// Student display name, or the sentinel for dangling references
    pub name: String,

    /// Preliminary term score
    pub prelim: Option<f64>,

    /// Midterm score
    pub midterm: Option<f64>,

    /// Semi-final term score
    pub semifinal: Option<f64>,

    /// Explicitly stored final score, if any
    #[serde(rename = "final")]
    pub final_term: Option<f64>,
}

impl GradeRecord {
    /// The final score used for pass/fail analysis
    ///
    /// An explicitly stored final is used directly; otherwise the mean of
    /// the three recorded terms, with absent terms counting as zero.
    /// Rounded to two decimal places.
    pub fn final_score(&self) -> f64 {
        let score = match self.final_term {
            Some(stored) => stored,
            None => {
                let prelim = self.prelim.unwrap_or(0.0);
                let midterm = self.midterm.unwrap_or(0.0);
                let semifinal = self.semifinal.unwrap_or(0.0);
                (prelim + midterm + semifinal) / 3.0
            }
        };

        round2(score)
    }

    /// Whether this record passes
    pub fn passed(&self) -> bool {
        self.final_score() >= PASSING_GRADE
    }
}

/// Rounds to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

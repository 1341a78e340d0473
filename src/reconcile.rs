//! Joins raw grade rows with student identity rows into the records the
//! grade table and the report pipeline consume.

use crate::models::{Grade, GradeRecord, Student};

/// Name substituted when a grade row references a student that no longer exists
pub const UNKNOWN_STUDENT: &str = "Unknown Student";

/// Produces one display-ready record per grade row, in the rows' original order
///
/// A grade whose `student_id` matches no student gets the sentinel name
/// rather than an error; term scores are copied through untouched, so an
/// empty cell stays empty.
pub fn reconcile(grades: &[Grade], students: &[Student]) -> Vec<GradeRecord> {
    grades
        .iter()
        .map(|grade| {
            let name = students
                .iter()
                .find(|student| student.id == grade.student_id)
                .map(|student| student.full_name())
                .unwrap_or_else(|| UNKNOWN_STUDENT.to_string());

            GradeRecord {
                id: grade.id.clone(),
                name,
                prelim: grade.prelim,
                midterm: grade.midterm,
                semifinal: grade.semifinal,
                final_term: grade.final_term,
            }
        })
        .collect()
}

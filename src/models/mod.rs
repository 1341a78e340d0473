/// Data models module
///
/// One file per entity. `Student`, `Subject` and `Grade` mirror the rows
/// owned by the hosted backend; `GradeRecord` and `Report` are transient
/// types derived from them for display and report generation.

mod grade;
mod record;
mod report;
mod student;
mod subject;

// Re-export all model types
pub use grade::{Grade, TermField};
pub use record::{GradeRecord, PASSING_GRADE};
pub use report::Report;
pub use student::Student;
pub use subject::Subject;

//! Grade-change CSV report
//!
//! One row per grade change: `grader name, grader id, date, time`. No header
//! row. Events without a resolvable grader are skipped.

mod writer;

pub use writer::{
    build_rows, report_file_name, write_report, write_report_file, ReportRow, ReportSummary,
};

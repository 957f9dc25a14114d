//! CSV report writer

use crate::canvas::{Course, GradeChangeEvent, StaffIndex};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One CSV line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub id: u64,
    pub date: String,
    pub time: String,
}

/// Outcome of writing a report file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub rows_written: usize,
    /// Grade changes dropped because their grader was unknown
    pub skipped: usize,
}

/// `"{course name}-{course id}.csv"`, with path separators replaced
pub fn report_file_name(course: &Course) -> String {
    let name: String = course
        .name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{name}-{}.csv", course.id)
}

/// Resolve graders and format timestamps. Returns the rows and the number
/// of grade changes skipped for lack of a known grader.
pub fn build_rows(events: &[GradeChangeEvent], staff: &StaffIndex) -> (Vec<ReportRow>, usize) {
    let mut rows = Vec::new();
    let mut skipped = 0;

    for event in events.iter().filter(|e| e.is_grade_change()) {
        let Some(member) = event.links.grader.and_then(|id| staff.get(id)) else {
            debug!(
                "Skipping grade change {:?}: grader {:?} not on staff",
                event.id, event.links.grader
            );
            skipped += 1;
            continue;
        };

        rows.push(ReportRow {
            name: member.name.clone(),
            id: member.id,
            date: event.created_at.format("%Y-%m-%d").to_string(),
            time: event.created_at.format("%H:%M:%S").to_string(),
        });
    }

    (rows, skipped)
}

/// Write rows as headerless CSV
pub fn write_report<W: Write>(writer: W, rows: &[ReportRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Build and write the report for `course` into `dir`
pub fn write_report_file(
    dir: &Path,
    course: &Course,
    events: &[GradeChangeEvent],
    staff: &StaffIndex,
) -> Result<ReportSummary> {
    let (rows, skipped) = build_rows(events, staff);
    let path = dir.join(report_file_name(course));

    let file = std::fs::File::create(&path)?;
    write_report(std::io::BufWriter::new(file), &rows)?;

    Ok(ReportSummary {
        path,
        rows_written: rows.len(),
        skipped,
    })
}

//! LMS endpoints
//!
//! Thin callers of the pager: each builds a start URL, hands it to a
//! [`Pager`](crate::pagination::Pager) and turns the merged result into typed
//! records.
//!
//! - `courses?enrollment_type=..` for every staff enrollment type
//! - `courses/{id}/users?enrollment_type[]=..` for the staff roster
//! - `audit/grade_change?course_id=..` for grade-change audit events

mod client;
mod types;

pub use client::{CanvasClient, Endpoint};
pub use types::{Course, EnrollmentType, EventLinks, GradeChangeEvent, StaffIndex, StaffMember};

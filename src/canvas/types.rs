//! Typed LMS records

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Staff enrollment types whose members can grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrollmentType {
    /// Teaching assistant
    Ta,
    /// Lecturer
    Teacher,
    /// Unit designer
    Designer,
}

impl EnrollmentType {
    /// Every staff enrollment type, in lookup order
    pub const ALL: [EnrollmentType; 3] = [
        EnrollmentType::Ta,
        EnrollmentType::Teacher,
        EnrollmentType::Designer,
    ];

    /// Value the API expects
    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentType::Ta => "ta",
            EnrollmentType::Teacher => "teacher",
            EnrollmentType::Designer => "designer",
        }
    }
}

impl fmt::Display for EnrollmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course the token's user is enrolled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    /// Missing for date-restricted courses
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub course_code: Option<String>,
}

/// A user enrolled as staff in a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sortable_name: Option<String>,
    #[serde(default)]
    pub login_id: Option<String>,
}

/// Staff roster indexed by user id
#[derive(Debug, Clone, Default)]
pub struct StaffIndex {
    by_id: HashMap<u64, StaffMember>,
}

impl StaffIndex {
    /// Index members by id; a later duplicate replaces an earlier one
    pub fn from_members(members: impl IntoIterator<Item = StaffMember>) -> Self {
        let by_id = members.into_iter().map(|m| (m.id, m)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: u64) -> Option<&StaffMember> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Ids of the objects a grade-change event refers to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLinks {
    /// Null for automatic grade changes
    #[serde(default, deserialize_with = "lenient_id")]
    pub grader: Option<u64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub student: Option<u64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub assignment: Option<u64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub course: Option<u64>,
}

/// One entry of the grade-change audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeChangeEvent {
    #[serde(default)]
    pub id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub event_type: String,
    #[serde(default)]
    pub grade_before: Option<String>,
    #[serde(default)]
    pub grade_after: Option<String>,
    #[serde(default)]
    pub links: EventLinks,
}

impl GradeChangeEvent {
    /// Event type of an actual grade change (the log also carries other kinds)
    pub const GRADE_CHANGE: &'static str = "grade_change";

    pub fn is_grade_change(&self) -> bool {
        self.event_type == Self::GRADE_CHANGE
    }

    /// Decode the grade changes in the `events` list of a merged audit
    /// envelope. Other event types are left undecoded and dropped.
    pub fn from_envelope(envelope: &JsonObject) -> Result<Vec<Self>> {
        let events = envelope
            .get("events")
            .ok_or_else(|| Error::decode("audit response has no `events` field"))?;
        let JsonValue::Array(events) = events else {
            return Err(Error::decode("audit response `events` is not a list"));
        };

        let grade_changes: Vec<&JsonValue> = events
            .iter()
            .filter(|event| {
                event.get("event_type").and_then(JsonValue::as_str) == Some(Self::GRADE_CHANGE)
            })
            .collect();
        if grade_changes.len() < events.len() {
            debug!(
                "Ignoring {} audit events that are not grade changes",
                events.len() - grade_changes.len()
            );
        }

        grade_changes
            .into_iter()
            .map(|event| Ok(Self::deserialize(event)?))
            .collect()
    }
}

/// Ids arrive as numbers, numeric strings or null
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(JsonValue::Number(n)) => n.as_u64(),
        Some(JsonValue::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

//! LMS API client built on the pager

use super::types::{Course, EnrollmentType, GradeChangeEvent, StaffMember};
use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::Pager;
use crate::progress::{NoProgress, ProgressReporter};
use crate::types::JsonObject;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Builds an endpoint URL under the API base: path segments, then query
/// parameters in the order given.
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Start at `base` (e.g. `https://lms.example.com/api/v1`)
    pub fn new(base: &Url) -> Result<Self> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("base URL {base} cannot take a path")))?
            .pop_if_empty();
        Ok(Self { url })
    }

    /// Append one path segment (percent-encoded as needed)
    #[must_use]
    pub fn segment(mut self, segment: impl AsRef<str>) -> Self {
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.push(segment.as_ref());
        }
        self
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.url
            .query_pairs_mut()
            .append_pair(key, &value.to_string());
        self
    }

    pub fn build(self) -> Url {
        self.url
    }
}

/// Client for the course, roster and audit endpoints
#[derive(Debug)]
pub struct CanvasClient {
    http: HttpClient,
    base_url: Url,
    credential: Credential,
    per_page: u32,
    max_pages: Option<usize>,
}

impl CanvasClient {
    /// Default page size requested from list endpoints
    pub const DEFAULT_PER_PAGE: u32 = 100;

    pub fn new(http: HttpClient, base_url: Url, credential: Credential) -> Self {
        Self {
            http,
            base_url,
            credential,
            per_page: Self::DEFAULT_PER_PAGE,
            max_pages: None,
        }
    }

    /// Page size for list endpoints
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Ceiling on pages per fetch sequence
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn pager(&self) -> Pager<'_, HttpClient> {
        Pager::new(&self.http, self.credential.clone()).with_max_pages(self.max_pages)
    }

    fn endpoint(&self) -> Result<Endpoint> {
        Endpoint::new(&self.base_url)
    }

    /// `courses?per_page=..&enrollment_type=..`
    pub fn courses_url(&self, enrollment: EnrollmentType) -> Result<Url> {
        Ok(self
            .endpoint()?
            .segment("courses")
            .query("per_page", self.per_page)
            .query("enrollment_type", enrollment)
            .build())
    }

    /// `courses/{id}/users?enrollment_type[]=..&per_page=..`
    pub fn staff_url(&self, course_id: u64, enrollment: EnrollmentType) -> Result<Url> {
        Ok(self
            .endpoint()?
            .segment("courses")
            .segment(course_id.to_string())
            .segment("users")
            .query("enrollment_type[]", enrollment)
            .query("per_page", self.per_page)
            .build())
    }

    /// `audit/grade_change?course_id=..&per_page=..`
    pub fn grade_change_url(&self, course_id: u64) -> Result<Url> {
        Ok(self
            .endpoint()?
            .segment("audit")
            .segment("grade_change")
            .query("course_id", course_id)
            .query("per_page", self.per_page)
            .build())
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let records = self.pager().fetch_all(url).await?.into_sequence()?;
        records
            .into_iter()
            .map(|record| Ok(serde_json::from_value(record)?))
            .collect()
    }

    /// Courses where the user is TA, teacher or designer, sorted by name.
    ///
    /// A course reachable through several enrollment types appears once.
    pub async fn load_courses(&self) -> Result<Vec<Course>> {
        let mut courses: Vec<Course> = Vec::new();
        for enrollment in EnrollmentType::ALL {
            let found: Vec<Course> = self.fetch_list(self.courses_url(enrollment)?).await?;
            debug!("{} courses as {enrollment}", found.len());
            courses.extend(found);
        }

        courses.sort_by(|a, b| a.name.cmp(&b.name));
        let mut seen = std::collections::HashSet::new();
        courses.retain(|c| seen.insert(c.id));

        info!("Found {} courses", courses.len());
        Ok(courses)
    }

    /// TAs, teachers and designers of a course, sorted by user id
    pub async fn get_staff(&self, course_id: u64) -> Result<Vec<StaffMember>> {
        let mut staff: Vec<StaffMember> = Vec::new();
        for enrollment in EnrollmentType::ALL {
            let found: Vec<StaffMember> =
                self.fetch_list(self.staff_url(course_id, enrollment)?).await?;
            debug!("{} staff enrolled as {enrollment}", found.len());
            staff.extend(found);
        }

        staff.sort_by_key(|m| m.id);
        info!("Found {} staff enrollments in course {course_id}", staff.len());
        Ok(staff)
    }

    /// Merged grade-change audit envelope for a course
    pub async fn grade_change_envelope(
        &self,
        course_id: u64,
        progress: &mut dyn ProgressReporter,
    ) -> Result<JsonObject> {
        let url = self.grade_change_url(course_id)?;
        self.pager()
            .fetch_all_with_progress(url, progress)
            .await?
            .into_envelope()
    }

    /// Every grade-change audit event of a course
    pub async fn get_grading_events(
        &self,
        course_id: u64,
        progress: &mut dyn ProgressReporter,
    ) -> Result<Vec<GradeChangeEvent>> {
        let envelope = self.grade_change_envelope(course_id, progress).await?;
        let events = GradeChangeEvent::from_envelope(&envelope)?;
        info!("Found {} audit events in course {course_id}", events.len());
        Ok(events)
    }

    /// [`CanvasClient::get_grading_events`] without progress output
    pub async fn get_grading_events_quiet(&self, course_id: u64) -> Result<Vec<GradeChangeEvent>> {
        self.get_grading_events(course_id, &mut NoProgress).await
    }
}

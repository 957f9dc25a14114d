//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: Link-header pages → merged result → CSV report

use grade_audit::canvas::{CanvasClient, StaffIndex};
use grade_audit::http::{HttpClient, HttpClientConfig};
use grade_audit::progress::CountingProgress;
use grade_audit::report::write_report_file;
use grade_audit::{Credential, Error, Pager};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap()
}

fn link_to(server: &MockServer, path_and_query: &str) -> String {
    format!("<{}{path_and_query}>; rel=\"next\"", server.uri())
}

// ============================================================================
// Pager against a live HTTP server
// ============================================================================

#[tokio::test]
async fn test_three_pages_carry_the_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("page"))
        .and(query_param("access_token", "s3cret"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link_to(&server, "/items?page=2").as_str())
                .set_body_json(json!([1, 2])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .and(query_param("access_token", "s3cret"))
        .respond_with(
            ResponseTemplate::new(200)
                // relative target, resolved against the page-2 URL
                .insert_header("Link", "</items?page=3>; rel=\"next\"")
                .set_body_json(json!([3])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "3"))
        .and(query_param("access_token", "s3cret"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", "</items?page=1>; rel=\"first\"")
                .set_body_json(json!([4, 5])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let http = http();
    let pager = Pager::new(&http, Credential::new("s3cret"));
    let start = Url::parse(&format!("{}/items", server.uri())).unwrap();

    let mut progress = CountingProgress::default();
    let acc = pager
        .fetch_all_with_progress(start, &mut progress)
        .await
        .unwrap();

    assert_eq!(acc.pages(), 3);
    assert_eq!(
        acc.into_sequence().unwrap(),
        vec![json!(1), json!(2), json!(3), json!(4), json!(5)]
    );
    assert_eq!(progress.ticks, 2);
    assert_eq!(progress.finishes, 1);
}

#[tokio::test]
async fn test_envelope_lists_extend_and_objects_keep_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/audit"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link_to(&server, "/audit?page=2").as_str())
                .set_body_json(json!({
                    "events": [{"id": "a"}],
                    "linked": {"users": "first"}
                })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/audit"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{"id": "b"}],
            "linked": {"users": "second"},
            "meta": {"count": 2}
        })))
        .mount(&server)
        .await;

    let http = http();
    let pager = Pager::new(&http, Credential::new("tok"));
    let start = Url::parse(&format!("{}/audit", server.uri())).unwrap();

    let envelope = pager.fetch_all(start).await.unwrap().into_envelope().unwrap();

    assert_eq!(envelope["events"], json!([{"id": "a"}, {"id": "b"}]));
    assert_eq!(envelope["linked"], json!({"users": "first"}));
    assert_eq!(envelope["meta"], json!({"count": 2}));
}

#[tokio::test]
async fn test_server_error_mid_sequence_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link_to(&server, "/items?page=2").as_str())
                .set_body_json(json!([1])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let http = http();
    let pager = Pager::new(&http, Credential::new("tok"));
    let start = Url::parse(&format!("{}/items", server.uri())).unwrap();

    let err = pager.fetch_all(start).await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
}

#[tokio::test]
async fn test_page_ceiling_stops_runaway_sequence() {
    let server = MockServer::start().await;

    // Every page points at itself
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", "</loop>; rel=\"next\"")
                .set_body_json(json!([0])),
        )
        .mount(&server)
        .await;

    let http = http();
    let pager = Pager::new(&http, Credential::new("tok")).with_max_pages(Some(4));
    let start = Url::parse(&format!("{}/loop", server.uri())).unwrap();

    let err = pager.fetch_all(start).await.unwrap_err();
    assert!(matches!(err, Error::PaginationLimitExceeded { limit: 4 }));
}

// ============================================================================
// Report flow
// ============================================================================

async fn mount_courses(server: &MockServer) {
    for (enrollment, body) in [
        ("ta", json!([{"id": 7, "name": "Systems Programming"}])),
        ("teacher", json!([{"id": 7, "name": "Systems Programming"}, {"id": 3, "name": "Algorithms"}])),
        ("designer", json!([])),
    ] {
        Mock::given(method("GET"))
            .and(path("/api/v1/courses"))
            .and(query_param("enrollment_type", enrollment))
            .and(query_param("access_token", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

async fn mount_staff(server: &MockServer) {
    for (enrollment, body) in [
        ("ta", json!([{"id": 30, "name": "Tara Assist"}])),
        ("teacher", json!([{"id": 10, "name": "Lee, Prof"}])),
        ("designer", json!([])),
    ] {
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/7/users"))
            .and(query_param("enrollment_type[]", enrollment))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

async fn mount_events(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/audit/grade_change"))
        .and(query_param("course_id", "7"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    link_to(server, "/api/v1/audit/grade_change?course_id=7&per_page=100&page=2")
                        .as_str(),
                )
                .set_body_json(json!({
                    "events": [
                        {"id": "e1", "created_at": "2024-03-01T04:05:06Z", "event_type": "grade_change", "links": {"grader": "10"}},
                        {"id": "e2", "created_at": "2024-03-01T05:00:00Z", "event_type": "grade_change", "links": {"grader": 99}}
                    ]
                })),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/audit/grade_change"))
        .and(query_param("page", "2"))
        .and(query_param("access_token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [
                {"id": "e3", "created_at": "2024-03-02T23:59:59Z", "event_type": "grade_change", "links": {"grader": 30}},
                {"id": "e4", "created_at": "2024-03-02T00:00:00Z", "event_type": "submission", "links": {"grader": 30}}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_report_flow() {
    let server = MockServer::start().await;
    mount_courses(&server).await;
    mount_staff(&server).await;
    mount_events(&server).await;

    let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
    let client = CanvasClient::new(http(), base, Credential::new("tok"));

    let courses = client.load_courses().await.unwrap();
    let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Algorithms", "Systems Programming"]);

    let course = &courses[1];
    let staff = StaffIndex::from_members(client.get_staff(course.id).await.unwrap());
    assert_eq!(staff.len(), 2);

    let events = client.get_grading_events_quiet(course.id).await.unwrap();
    assert_eq!(events.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let summary = write_report_file(dir.path(), course, &events, &staff).unwrap();

    assert_eq!(summary.path, dir.path().join("Systems Programming-7.csv"));
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.skipped, 1);

    let written = std::fs::read_to_string(&summary.path).unwrap();
    assert_eq!(
        written,
        "\"Lee, Prof\",10,2024-03-01,04:05:06\nTara Assist,30,2024-03-02,23:59:59\n"
    );
}

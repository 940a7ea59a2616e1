//! Assertions on problem-details error responses.
//!
//! Kept free of backend types so the contract is checked from the outside,
//! the way a client sees it.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";
pub const TYPE_PREFIX: &str = "https://cardtable.app/errors/";

/// Client-side mirror of the backend's problem body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemBody {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Check the error contract and return the parsed body for further asserts.
///
/// Verifies status, content type, `type` URI, `code`, that `x-trace-id`
/// equals the body's `trace_id`, and optionally a substring of `detail`.
pub fn assert_problem(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    detail_contains: Option<&str>,
) -> ProblemBody {
    assert_eq!(status, expected_status, "unexpected status, body: {}", String::from_utf8_lossy(body));

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with(PROBLEM_CONTENT_TYPE),
        "expected {PROBLEM_CONTENT_TYPE}, got '{content_type}'"
    );

    let problem: ProblemBody =
        serde_json::from_slice(body).expect("body should be a problem-details document");

    let header_trace = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id should be ASCII");
    assert_eq!(problem.trace_id, header_trace, "body trace_id must match x-trace-id");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.type_, format!("{TYPE_PREFIX}{expected_code}"));
    assert!(!problem.title.is_empty());

    if let Some(fragment) = detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "expected detail to contain '{fragment}', got '{}'",
            problem.detail
        );
    }
    problem
}

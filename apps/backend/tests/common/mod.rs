#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::{assert_problem, ProblemBody};
use serde_json::Value;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert a problem-details response and hand back its body.
pub async fn expect_problem(
    resp: ServiceResponse<BoxBody>,
    status: StatusCode,
    code: &str,
    detail_contains: Option<&str>,
) -> ProblemBody {
    let actual = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem(actual, &headers, &body, code, status, detail_contains)
}

/// Assert 200 and parse the JSON body.
pub async fn expect_json(resp: ServiceResponse<BoxBody>) -> Value {
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        StatusCode::OK,
        "unexpected status, body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("response body should be JSON")
}

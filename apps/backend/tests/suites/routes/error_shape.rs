use actix_web::http::StatusCode;
use actix_web::test;

use crate::common::expect_problem;
use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn problem_responses_carry_matching_trace_ids() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/deck/Nope").to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id on every response");

    let problem = expect_problem(resp, StatusCode::NOT_FOUND, "DECK_NOT_FOUND", None).await;
    assert_eq!(problem.trace_id, request_id);
    assert_eq!(problem.title, "Deck Not Found");
}

#[actix_web::test]
async fn successful_responses_carry_a_request_id() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/decks").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let id = resp.headers().get("x-request-id").expect("x-request-id");
    assert_eq!(id.len(), 36);
    assert!(resp.headers().get("x-trace-id").is_none());
}

#[actix_web::test]
async fn sanitized_names_address_the_same_deck() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_payload("deck_name,title\nParty.Night,P1\n")
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/deck/Party.Night").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

use actix_web::http::StatusCode;
use actix_web::test;
use cardtable::domain::table::ResumePolicy;
use serde_json::{json, Value};

use crate::common::{expect_json, expect_problem};
use crate::support::create_test_app;
use crate::support::fixtures::{TRIVIA_CSV, TRIVIA_PICKS};
use crate::support::test_state::{import, scripted_state};

fn get(uri: &str) -> actix_http::Request {
    test::TestRequest::get().uri(uri).to_request()
}

fn post(uri: &str) -> actix_http::Request {
    test::TestRequest::post().uri(uri).to_request()
}

fn title(view: &Value) -> &str {
    view["card"]["title"].as_str().unwrap_or_default()
}

#[actix_web::test]
async fn open_shows_the_deck_back() {
    let state = scripted_state(TRIVIA_PICKS, ResumePolicy::FaceUp).await;
    import(&state, TRIVIA_CSV).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let view = expect_json(test::call_service(&app, get("/api/deck/Trivia/table")).await).await;
    assert_eq!(view["deck"], "Trivia");
    assert_eq!(view["phase"], "waiting_to_start");
    assert_eq!(view["remaining"], 3);
    assert_eq!(view["total"], 3);
    assert_eq!(view["backIcon"], "fa-brain");
    assert!(view["card"].is_null());
    assert!(view["notice"].is_null());
    assert_eq!(view["action"]["timer"]["phase"], "idle");

    let saved = expect_json(test::call_service(&app, get("/api/deck/Trivia/state")).await).await;
    assert_eq!(
        saved,
        json!({"shuffledOrder": [2, 0, 1], "drawnCards": [], "currentCardIndex": -1})
    );
}

#[actix_web::test]
async fn trivia_draws_in_shuffle_order_then_reshuffles() {
    let state = scripted_state(TRIVIA_PICKS, ResumePolicy::FaceUp).await;
    import(&state, TRIVIA_CSV).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let mut titles = Vec::new();
    for remaining in [2, 1, 0] {
        let view =
            expect_json(test::call_service(&app, post("/api/deck/Trivia/table/draw")).await).await;
        assert_eq!(view["phase"], "face_shown");
        assert_eq!(view["remaining"], remaining);
        assert!(view["notice"].is_null());
        titles.push(title(&view).to_string());
    }
    assert_eq!(titles, ["Q3", "Q1", "Q2"]);

    let saved = expect_json(test::call_service(&app, get("/api/deck/Trivia/state")).await).await;
    assert_eq!(saved["drawnCards"], json!([2, 0, 1]));
    assert_eq!(saved["currentCardIndex"], 2);

    let view =
        expect_json(test::call_service(&app, post("/api/deck/Trivia/table/draw")).await).await;
    assert_eq!(view["phase"], "waiting_to_start");
    assert_eq!(view["remaining"], 3);
    assert!(view["card"].is_null());
    assert_eq!(
        view["notice"],
        json!({"kind": "deck_exhausted", "message": "Deck is empty. Reshuffling..."})
    );

    let saved = expect_json(test::call_service(&app, get("/api/deck/Trivia/state")).await).await;
    assert_eq!(saved["drawnCards"], json!([]));
}

#[actix_web::test]
async fn reset_reshuffles_from_any_phase() {
    let state = scripted_state(TRIVIA_PICKS, ResumePolicy::FaceUp).await;
    import(&state, TRIVIA_CSV).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    test::call_service(&app, post("/api/deck/Trivia/table/draw")).await;
    let view =
        expect_json(test::call_service(&app, post("/api/deck/Trivia/table/reset")).await).await;
    assert_eq!(view["phase"], "waiting_to_start");
    assert_eq!(view["remaining"], 3);
    assert!(view["card"].is_null());

    let saved = expect_json(test::call_service(&app, get("/api/deck/Trivia/state")).await).await;
    assert_eq!(saved["currentCardIndex"], -1);
}

async fn resume_with(policy: ResumePolicy) -> Value {
    let state = scripted_state([], policy).await;
    import(&state, TRIVIA_CSV).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let doc = json!({"shuffledOrder": [2, 0, 1], "drawnCards": [2], "currentCardIndex": 0});
    let req = test::TestRequest::post()
        .uri("/api/deck/Trivia/state")
        .set_json(&doc)
        .to_request();
    expect_json(test::call_service(&app, req).await).await;

    let opened = expect_json(test::call_service(&app, get("/api/deck/Trivia/table")).await).await;
    let drawn =
        expect_json(test::call_service(&app, post("/api/deck/Trivia/table/draw")).await).await;
    json!({"opened": opened, "drawn": drawn})
}

#[actix_web::test]
async fn resume_face_up_shows_the_last_card() {
    let views = resume_with(ResumePolicy::FaceUp).await;
    let opened = &views["opened"];
    assert_eq!(opened["phase"], "face_shown");
    assert_eq!(opened["card"]["index"], 2);
    assert_eq!(title(opened), "Q3");
    assert_eq!(opened["remaining"], 2);
    assert_eq!(title(&views["drawn"]), "Q1");
}

#[actix_web::test]
async fn resume_face_down_waits_for_the_next_draw() {
    let views = resume_with(ResumePolicy::FaceDown).await;
    let opened = &views["opened"];
    assert_eq!(opened["phase"], "waiting_to_start");
    assert!(opened["card"].is_null());
    assert_eq!(opened["remaining"], 2);
    assert_eq!(title(&views["drawn"]), "Q1");
}

#[actix_web::test]
async fn saving_state_replaces_the_open_session() {
    let state = scripted_state(TRIVIA_PICKS, ResumePolicy::FaceUp).await;
    import(&state, TRIVIA_CSV).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    test::call_service(&app, post("/api/deck/Trivia/table/draw")).await;

    let req = test::TestRequest::post()
        .uri("/api/deck/Trivia/state")
        .set_json(json!({}))
        .to_request();
    expect_json(test::call_service(&app, req).await).await;

    // `{}` reads as no state, so the table starts over
    let view = expect_json(test::call_service(&app, get("/api/deck/Trivia/table")).await).await;
    assert_eq!(view["phase"], "waiting_to_start");
    assert_eq!(view["remaining"], 3);
}

#[actix_web::test]
async fn out_of_range_cursor_reshuffles_instead_of_failing() {
    let state = scripted_state(TRIVIA_PICKS, ResumePolicy::FaceUp).await;
    import(&state, TRIVIA_CSV).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/deck/Trivia/state")
        .set_json(json!({
            "shuffledOrder": [0, 1, 2],
            "drawnCards": [0],
            "currentCardIndex": i64::MAX,
        }))
        .to_request();
    expect_json(test::call_service(&app, req).await).await;

    let view =
        expect_json(test::call_service(&app, post("/api/deck/Trivia/table/draw")).await).await;
    assert_eq!(view["phase"], "waiting_to_start");
    assert_eq!(view["remaining"], 3);
    assert_eq!(view["notice"]["kind"], "deck_exhausted");

    let saved = expect_json(test::call_service(&app, get("/api/deck/Trivia/state")).await).await;
    assert_eq!(saved["currentCardIndex"], -1);
}

#[actix_web::test]
async fn unknown_deck_has_no_table() {
    let state = scripted_state([], ResumePolicy::FaceUp).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    expect_problem(
        test::call_service(&app, post("/api/deck/Missing/table/draw")).await,
        StatusCode::NOT_FOUND,
        "DECK_NOT_FOUND",
        Some("Missing"),
    )
    .await;
}

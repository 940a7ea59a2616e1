use actix_web::http::StatusCode;
use actix_web::test;
use cardtable::domain::table::ResumePolicy;
use serde_json::{json, Value};

use crate::common::{expect_json, expect_problem};
use crate::support::create_test_app;
use crate::support::fixtures::ACTIONS_CSV;
use crate::support::test_state::{import, scripted_state};

fn post(uri: &str) -> actix_http::Request {
    test::TestRequest::post().uri(uri).to_request()
}

async fn actions_app(
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let state = scripted_state([], ResumePolicy::FaceUp).await;
    import(&state, ACTIONS_CSV).await;
    create_test_app(state).with_prod_routes().build().await
}

fn timer(view: &Value) -> &Value {
    &view["action"]["timer"]
}

#[actix_web::test]
async fn timer_lifecycle_over_http() {
    let app = actions_app().await;

    let view = expect_json(test::call_service(&app, post("/api/deck/Timers/table/draw")).await).await;
    assert_eq!(view["offer"], json!({"timerSeconds": 30, "diceSides": null}));

    let view = expect_json(
        test::call_service(&app, post("/api/deck/Timers/table/timer/start")).await,
    )
    .await;
    assert_eq!(view["cardIndex"], 0);
    assert_eq!(
        *timer(&view),
        json!({"phase": "running", "remainingSeconds": 30, "initialSeconds": 30})
    );

    let view = expect_json(
        test::call_service(&app, post("/api/deck/Timers/table/timer/pause")).await,
    )
    .await;
    assert_eq!(timer(&view)["phase"], "paused");

    expect_problem(
        test::call_service(&app, post("/api/deck/Timers/table/timer/pause")).await,
        StatusCode::CONFLICT,
        "INVALID_TIMER_TRANSITION",
        Some("cannot pause a timer that is paused"),
    )
    .await;

    let view = expect_json(
        test::call_service(&app, post("/api/deck/Timers/table/timer/stop")).await,
    )
    .await;
    assert_eq!(
        *timer(&view),
        json!({"phase": "idle", "remainingSeconds": null, "initialSeconds": 30})
    );

    let view = expect_json(
        test::call_service(&app, post("/api/deck/Timers/table/timer/reset")).await,
    )
    .await;
    assert_eq!(timer(&view)["phase"], "paused");
    assert_eq!(timer(&view)["remainingSeconds"], 30);

    let req = test::TestRequest::get()
        .uri("/api/deck/Timers/table/action")
        .to_request();
    let view = expect_json(test::call_service(&app, req).await).await;
    assert_eq!(timer(&view)["phase"], "paused");
}

#[actix_web::test]
async fn actions_need_a_visible_card_that_offers_them() {
    let app = actions_app().await;

    // nothing drawn yet
    expect_problem(
        test::call_service(&app, post("/api/deck/Timers/table/timer/start")).await,
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_ACTION_VALUE",
        None,
    )
    .await;

    test::call_service(&app, post("/api/deck/Broken/table/draw")).await;
    expect_problem(
        test::call_service(&app, post("/api/deck/Broken/table/timer/start")).await,
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_ACTION_VALUE",
        Some("timer"),
    )
    .await;

    test::call_service(&app, post("/api/deck/Timers/table/draw")).await;
    expect_problem(
        test::call_service(&app, post("/api/deck/Timers/table/dice/roll")).await,
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_ACTION_VALUE",
        Some("dice"),
    )
    .await;
}

#[actix_web::test]
async fn dice_roll_lands_in_range() {
    let app = actions_app().await;
    let view = expect_json(test::call_service(&app, post("/api/deck/Dice/table/draw")).await).await;
    assert_eq!(view["offer"]["diceSides"], 6);
    assert!(view["action"]["dice"]["lastRoll"].is_null());

    // scripted source yields 0, the lowest face
    let view =
        expect_json(test::call_service(&app, post("/api/deck/Dice/table/dice/roll")).await).await;
    assert_eq!(view["action"]["dice"]["lastRoll"], 1);
}

#[actix_web::test]
async fn combo_card_offers_both_actions() {
    let app = actions_app().await;
    let view =
        expect_json(test::call_service(&app, post("/api/deck/Combo/table/draw")).await).await;
    assert_eq!(view["offer"], json!({"timerSeconds": 30, "diceSides": 8}));

    let view =
        expect_json(test::call_service(&app, post("/api/deck/Combo/table/dice/roll")).await).await;
    assert_eq!(view["action"]["dice"]["lastRoll"], 1);
    assert_eq!(view["action"]["timer"]["phase"], "idle");
}

#[actix_web::test]
async fn unknown_timer_operation_is_not_found() {
    let app = actions_app().await;
    expect_problem(
        test::call_service(&app, post("/api/deck/Timers/table/timer/explode")).await,
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        Some("explode"),
    )
    .await;
}

#[actix_web::test]
async fn drawing_a_new_card_discards_action_state() {
    let app = actions_app().await;
    test::call_service(&app, post("/api/deck/Timers/table/draw")).await;
    test::call_service(&app, post("/api/deck/Timers/table/timer/start")).await;

    // single-card deck: the next draw reshuffles and hides the card
    let view =
        expect_json(test::call_service(&app, post("/api/deck/Timers/table/draw")).await).await;
    assert_eq!(view["notice"]["kind"], "deck_exhausted");
    assert_eq!(timer(&view)["phase"], "idle");
    assert_eq!(view["offer"], json!({"timerSeconds": null, "diceSides": null}));
}

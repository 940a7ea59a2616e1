//! Server-side table: draw, reset and card actions for one deck.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::domain::timer::TimerOp;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::DeckName;
use crate::services::table::TableService;
use crate::state::app_state::AppState;

/// GET /api/deck/{name}/table
async fn open(name: DeckName, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = TableService::for_state(&app_state).open(name.as_str()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/deck/{name}/table/draw
async fn draw(name: DeckName, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = TableService::for_state(&app_state).draw(name.as_str()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/deck/{name}/table/reset
async fn reset(name: DeckName, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = TableService::for_state(&app_state).reset(name.as_str()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/deck/{name}/table/action
async fn action(name: DeckName, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = TableService::for_state(&app_state)
        .action(name.as_str())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/deck/{name}/table/timer/{op}
async fn timer(
    req: HttpRequest,
    name: DeckName,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let raw = req.match_info().get("op").unwrap_or_default();
    let op = raw
        .parse::<TimerOp>()
        .map_err(|e| AppError::not_found(ErrorCode::NotFound, e))?;

    let view = TableService::for_state(&app_state)
        .timer(name.as_str(), op)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/deck/{name}/table/dice/roll
async fn roll(name: DeckName, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = TableService::for_state(&app_state)
        .roll_dice(name.as_str())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/deck/{name}/table", web::get().to(open))
        .route("/deck/{name}/table/draw", web::post().to(draw))
        .route("/deck/{name}/table/reset", web::post().to(reset))
        .route("/deck/{name}/table/action", web::get().to(action))
        .route("/deck/{name}/table/timer/{op}", web::post().to(timer))
        .route("/deck/{name}/table/dice/roll", web::post().to(roll));
}

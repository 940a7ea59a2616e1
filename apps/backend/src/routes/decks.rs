//! Deck catalog and raw draw-state documents.

use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::extractors::{CsvUpload, DeckName, ValidatedJson};
use crate::repos::draw_states;
use crate::services::catalog::CatalogService;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct UploadResponse {
    message: &'static str,
    decks: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DeckEntry {
    name: String,
}

/// POST /api/upload
///
/// Takes a `multipart/form-data` form with a `file` part, or the CSV as the
/// raw body. Every deck named in it is created or replaced; open tables for
/// those decks are closed.
async fn upload(csv: CsvUpload, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let names = CatalogService::new()
        .import_csv(app_state.store(), &csv.into_inner())
        .await?;
    for name in &names {
        app_state.tables.evict(name);
    }
    Ok(HttpResponse::Ok().json(UploadResponse {
        message: "Decks processed successfully.",
        decks: names,
    }))
}

/// GET /api/decks
async fn list_decks(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let names = CatalogService::new().list(app_state.store()).await?;
    let entries: Vec<DeckEntry> = names.into_iter().map(|name| DeckEntry { name }).collect();
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/deck/{name}
async fn get_deck(name: DeckName, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let deck = CatalogService::new()
        .get(app_state.store(), name.as_str())
        .await?;
    Ok(HttpResponse::Ok().json(deck))
}

/// DELETE /api/deck/{name}
async fn delete_deck(
    name: DeckName,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    CatalogService::new()
        .delete(app_state.store(), name.as_str())
        .await?;
    app_state.tables.evict(name.as_str());
    Ok(HttpResponse::Ok().json(json!({ "message": "Deck deleted successfully." })))
}

/// GET /api/deck/{name}/state
async fn get_state(name: DeckName, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let doc = draw_states::load_raw_state(app_state.store(), name.as_str()).await?;
    Ok(HttpResponse::Ok().json(doc))
}

/// POST /api/deck/{name}/state
///
/// Stores the document verbatim. The open table, if any, is dropped so the
/// next table request resumes from what was written here.
async fn save_state(
    name: DeckName,
    body: ValidatedJson<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    draw_states::save_raw_state(app_state.store(), name.as_str(), &body).await?;
    app_state.tables.evict(name.as_str());
    Ok(HttpResponse::Ok().json(json!({ "message": "State saved." })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", web::post().to(upload))
    .route("/decks", web::get().to(list_decks))
    .service(
        web::resource("/deck/{name}")
            .route(web::get().to(get_deck))
            .route(web::delete().to(delete_deck)),
    )
    .service(
        web::resource("/deck/{name}/state")
            .route(web::get().to(get_state))
            .route(web::post().to(save_state)),
    );
}

use actix_web::web;

pub mod decks;
pub mod health;
pub mod table;

/// Mount every route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(
        web::scope("/api")
            .configure(decks::configure_routes)
            .configure(table::configure_routes),
    );
}

use actix_web::{web, App, HttpServer};
use cardtable::config::AppConfig;
use cardtable::infra::state::build_state;
use cardtable::middleware::cors::cors_middleware;
use cardtable::middleware::request_trace::RequestTrace;
use cardtable::middleware::structured_logger::StructuredLogger;
use cardtable::middleware::trace_span::TraceSpan;
use cardtable::routes;
use cardtable::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_config(&config).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        decks_dir = %config.decks_dir.display(),
        resume_policy = %config.resume_policy,
        seeded = config.rng_seed.is_some(),
        "starting card table backend"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

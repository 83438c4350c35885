#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the Zurich population dashboard.
//!
//! Loads the population CSV once at startup, serves the JSON API that
//! recomputes the four dashboard figures, and serves the static browser
//! page that renders them with Plotly.

pub mod config;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use zurich_pop_dashboard::DashboardController;
use zurich_pop_dataset::Dataset;

pub use config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Controller over the dataset loaded at startup.
    pub controller: DashboardController,
}

/// Registers the `/api` routes.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/options", web::get().to(handlers::options))
            .route("/figures", web::get().to(handlers::figures)),
    );
}

/// Starts the dashboard server using configuration from the environment.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the HTTP server
/// fails to bind.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    run_with_config(ServerConfig::from_env()).await
}

/// Starts the dashboard server with an explicit configuration.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the HTTP server
/// fails to bind.
#[allow(clippy::future_not_send)]
pub async fn run_with_config(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Loading dataset from {}...", config.dataset_path.display());
    let dataset = Dataset::load_csv(&config.dataset_path).map_err(|e| {
        log::error!("Failed to load dataset: {e}");
        std::io::Error::other(e)
    })?;

    let controller = DashboardController::new(Arc::new(dataset));
    match controller.defaults() {
        Some(defaults) => log::info!(
            "Dataset covers {}..={}, default district {}",
            defaults.from,
            defaults.to,
            defaults.district
        ),
        None => log::warn!("Dataset is empty; figures require explicit parameters"),
    }

    let state = web::Data::new(AppState { controller });
    let static_dir = config.static_dir.clone();

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(api_routes)
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

mod charts;
mod config;
mod database;
mod error;
mod filters;
mod handlers;
mod models;
mod reports;
mod store;

use std::path::Path;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use log::info;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use config::Config;
use database::{open_database, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    let config = Config::from_env()?;

    let db = open_database(&config.data_file)
        .await
        .with_context(|| format!("Failed to open {}", config.data_file.display()))?;

    let app = create_router(db, &config.static_dir);

    let addr = config.address();
    info!("Lab inventory server starting on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(db: Database, static_dir: &Path) -> Router {
    Router::new()
        // Reports
        .route("/", get(handlers::index))
        .route("/lab", post(handlers::lab))

        // Record administration
        .route("/admin", get(handlers::admin))
        .route("/add_entry", post(handlers::add_entry))
        .route("/delete_entry", post(handlers::delete_entry))
        .route("/search", post(handlers::search))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(db)
}

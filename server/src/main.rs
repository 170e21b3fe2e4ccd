//! Catalog server: reads settings, prepares the database, serves the catalog API.
//!
//! Run from repo root: `cargo run -p catalog-server`

use axum::{extract::Request, ServiceExt};
use catalog_api::{app, ensure_database_exists, ensure_schema, init_tracing, AppState, PgCatalog, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    init_tracing(&settings.log_filter);

    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    ensure_schema(&pool).await?;

    let state = AppState::new(PgCatalog::new(pool));
    let app = app(state, settings.body_limit);

    let listener = TcpListener::bind(settings.bind_addr()?).await?;
    tracing::info!("catalog listening on http://{}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

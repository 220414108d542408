//! Cats API server: reads settings, ensures the database and tables exist, serves the cat routes.

use cats_api::{app, ensure_database_exists, ensure_tables, init_logging, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let _log_guard = init_logging(&settings.log_dir)?;

    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    ensure_tables(&pool).await?;

    let state = AppState { pool };
    let listener = TcpListener::bind(settings.bind_addr.as_str()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

//! Server binary: reads settings, prepares the database, mounts every route group and listens.

use memories_api::{
    app, ensure_database_exists, ensure_tables, from_env, AppState, GithubOAuth, JwtKeys, PgStore, UploadStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("memories_api=info,tower_http=info")),
        )
        .init();

    let settings = from_env()?;
    tracing::debug!(?settings, "loaded settings");

    ensure_database_exists(&settings.database.url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;
    ensure_tables(&pool).await?;

    tokio::fs::create_dir_all(&settings.uploads.dir).await?;

    let mut state = AppState::new(
        Arc::new(PgStore::new(pool)),
        JwtKeys::from_settings(&settings.jwt),
        UploadStore::new(settings.uploads.dir.clone()),
    )
    .with_public_url(settings.uploads.public_url.clone());
    match &settings.github {
        Some(github) => state = state.with_identity(Arc::new(GithubOAuth::new(github)?)),
        None => tracing::warn!("GITHUB_CLIENT_ID/GITHUB_CLIENT_SECRET not set; /register is disabled"),
    }

    let listener = TcpListener::bind(settings.server.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

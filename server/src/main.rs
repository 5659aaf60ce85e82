//! Etudiant server: reads configuration, prepares the store and serves the resource.
//!
//! Run from repo root: `cargo run -p etudiant-server`
//! Set `STORE=memory` to run without PostgreSQL.

use etudiant_service::{
    app, ensure_database_exists, ensure_etudiant_table, AppState, InMemoryEtudiantStore, PgEtudiantStore,
    ServiceConfig, StoreKind,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("etudiant_service=info,etudiant_server=info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    let state = match (config.store, config.database_url.as_deref()) {
        (StoreKind::Postgres, Some(database_url)) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_etudiant_table(&pool).await?;
            AppState::new(PgEtudiantStore::new(pool))
        }
        (StoreKind::Postgres, None) => return Err("DATABASE_URL is required for the postgres store".into()),
        (StoreKind::Memory, _) => {
            tracing::warn!("using in-memory store; data is lost on shutdown");
            AppState::new(InMemoryEtudiantStore::new())
        }
    };

    let router = app(state, &config);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

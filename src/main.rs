use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

use luna_backend::{logging, routes, AppState, Config, MemoryStore, PgStore, StorageBackend, Store};

async fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::info!("💾 Using in-memory storage");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL missing")?;
            let store = PgStore::connect(url, config.max_connections).await?;
            tracing::info!("🐘 Connected to Postgres");
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init();

    let config = Config::from_env()?;
    let store = open_store(&config).await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::app(AppState::new(store))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    let addr = config.addr();
    tracing::info!("🧠 Server running at {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}

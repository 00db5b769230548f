mod auth;
mod config;
mod content;
mod db;
mod editor;
mod errors;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::Sha256Verifier;
use crate::config::{Config, StoreBackend};
use crate::content::gateway::ContentGateway;
use crate::content::live::LiveDocument;
use crate::db::{create_pool, ensure_schema};
use crate::editor::AdminConsole;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, LocalCache, MemoryStore, PgStore, S3Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    let remote = build_store(&config.store_backend).await?;
    info!("{} document store initialized", remote.backend());

    let cache = LocalCache::new(&config.local_cache_path);
    let gateway = ContentGateway::new(remote, cache, &config.document_key)
        .with_remote_timeout(config.remote_timeout);

    // Never fails: degrades to the local cache, then to seeded defaults
    let live = LiveDocument::new(gateway.load().await);

    let verifier = Sha256Verifier::from_hex(&config.admin_secret_sha256)?;
    let console = AdminConsole::new(Arc::new(verifier));

    let state = AppState::new(gateway, live, console, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(backend: &StoreBackend) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match backend {
        StoreBackend::S3(settings) => Arc::new(S3Store::from_settings(settings).await),
        StoreBackend::Postgres { database_url } => {
            let pool = create_pool(database_url)?;
            if let Err(e) = ensure_schema(&pool).await {
                warn!("Could not ensure content_documents table: {e}");
            }
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

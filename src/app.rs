//! Application wiring and server startup.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{build_router, AppContext};
use crate::config::Config;
use crate::db;
use crate::error::Result;
use crate::service::{MetricsEngine, TokenService};
use crate::store::SqliteStore;

/// Main application struct.
pub struct App;

impl App {
    /// Wire the store, engine, and router, then serve until shutdown.
    pub async fn run(config: Config) -> Result<()> {
        let pool = db::create_pool(&config.database.url)?;
        db::run_migrations(&pool)?;
        info!(database = %config.database.url, "Database ready");

        let store = Arc::new(SqliteStore::new(pool));
        let engine = MetricsEngine::new(Arc::clone(&store));
        let tokens = Arc::new(TokenService::new(config.auth.clone()));

        let router = build_router(AppContext {
            store,
            engine,
            tokens,
        });

        let listener = TcpListener::bind(&config.server.bind).await?;
        info!(bind = %config.server.bind, auth = config.auth.enabled, "Listening");
        axum::serve(listener, router).await?;

        Ok(())
    }
}

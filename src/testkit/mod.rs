//! Test helpers: disposable stores and pre-wired routers.
//!
//! Single source of truth for the contexts used across tests, so tests
//! focus on assertions rather than wiring boilerplate.

use std::sync::Arc;

use axum::Router;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;

use crate::api::{build_router, AppContext};
use crate::config::AuthConfig;
use crate::db::{run_migrations, DbPool};
use crate::service::{MetricsEngine, TokenService};
use crate::store::{MemoryStore, SqliteStore, Store};

/// A migrated single-connection in-memory SQLite pool.
///
/// One connection keeps every operation on the same `:memory:` database.
pub fn sqlite_test_pool() -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("test pool");
    run_migrations(&pool).expect("migrations");
    pool
}

/// A SQLite store over a fresh in-memory database.
pub fn sqlite_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::new(sqlite_test_pool()))
}

/// App context over any store, with auth disabled.
pub fn context<S: Store>(store: Arc<S>) -> AppContext<S> {
    context_with_auth(store, AuthConfig::default())
}

/// App context over any store with explicit auth settings.
pub fn context_with_auth<S: Store>(store: Arc<S>, auth: AuthConfig) -> AppContext<S> {
    AppContext {
        engine: MetricsEngine::new(Arc::clone(&store)),
        tokens: Arc::new(TokenService::new(auth)),
        store,
    }
}

/// A ready-to-drive router over a fresh in-memory SQLite store, auth off.
pub fn test_router() -> Router {
    build_router(context(sqlite_store()))
}

/// A ready-to-drive router over a fresh memory store, auth off.
pub fn memory_router() -> Router {
    build_router(context(Arc::new(MemoryStore::new())))
}

/// A router with token auth enabled for the given credential pair.
pub fn auth_router(username: &str, password: &str) -> Router {
    build_router(context_with_auth(
        sqlite_store(),
        AuthConfig {
            enabled: true,
            username: username.into(),
            password: password.into(),
        },
    ))
}

//! HTTP API: router assembly and shared request context.

mod auth;
mod error;
mod purchase_orders;
mod types;
mod vendors;

pub use error::{ApiError, ValidationErrors};
pub use types::{PerformanceResponse, TokenResponse};

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::{MetricsEngine, TokenService};
use crate::store::Store;

use auth::AuthState;

/// Shared state handed to every handler.
pub struct AppContext<S> {
    pub store: Arc<S>,
    pub engine: MetricsEngine<S>,
    pub tokens: Arc<TokenService>,
}

impl<S> Clone for AppContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            engine: self.engine.clone(),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

/// Build the full API router. Everything except `/api/token-auth/` sits
/// behind the token middleware.
pub fn build_router<S: Store>(ctx: AppContext<S>) -> Router {
    let auth_state = AuthState {
        tokens: Arc::clone(&ctx.tokens),
    };

    Router::new()
        .route(
            "/api/vendors/",
            get(vendors::list::<S>).post(vendors::create::<S>),
        )
        .route(
            "/api/vendors/{id}/",
            get(vendors::retrieve::<S>)
                .put(vendors::update::<S>)
                .delete(vendors::destroy::<S>),
        )
        .route(
            "/api/vendors/{id}/performance/",
            get(vendors::performance::<S>),
        )
        .route(
            "/api/purchase_orders/",
            get(purchase_orders::list::<S>).post(purchase_orders::create::<S>),
        )
        .route(
            "/api/purchase_orders/{id}/",
            get(purchase_orders::retrieve::<S>)
                .put(purchase_orders::update::<S>)
                .delete(purchase_orders::destroy::<S>),
        )
        .layer(from_fn_with_state(auth_state, auth::require_token))
        .route("/api/token-auth/", post(auth::obtain_token::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

//! Token issuance endpoint and the bearer-token middleware.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::ApiError;
use super::types::{TokenRequest, TokenResponse};
use super::AppContext;
use crate::service::TokenService;
use crate::store::Store;

const NO_CREDENTIALS: &str = "Authentication credentials were not provided.";
const INVALID_TOKEN: &str = "Invalid token.";

/// State for the auth middleware; shared with the router's context.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

/// `POST /api/token-auth/` - exchange credentials for an opaque token.
pub async fn obtain_token<S: Store>(
    State(ctx): State<AppContext<S>>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(ApiError::bad_request(
            "username and password are required",
        ));
    };

    match ctx.tokens.issue(&username, &password) {
        Some(token) => Ok(Json(TokenResponse { token })),
        None => Err(ApiError::bad_request(
            "Unable to log in with provided credentials.",
        )),
    }
}

/// Reject requests without a valid `Authorization: Token <t>` (or
/// `Bearer <t>`) header. Passes everything through when auth is disabled.
pub async fn require_token(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.tokens.enabled() {
        return next.run(request).await;
    }

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(header) = header else {
        return ApiError::unauthorized(NO_CREDENTIALS).into_response();
    };

    let token = header
        .strip_prefix("Token ")
        .or_else(|| header.strip_prefix("Bearer "));

    match token {
        Some(token) if state.tokens.verify(token.trim()) => next.run(request).await,
        _ => ApiError::unauthorized(INVALID_TOKEN).into_response(),
    }
}

//! HTTP error mapping for the API handlers.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::error::{Error, StoreError};

/// Field-level validation errors, rendered as `{"field": ["message", ...]}`.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finish validation: `Ok` when no errors were collected.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

/// API-level errors with their HTTP renderings.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with a per-field error map.
    Validation(ValidationErrors),
    /// 404 with a plain error message.
    NotFound(&'static str),
    /// 401 for missing or unknown tokens.
    Unauthorized(&'static str),
    /// 400 with a plain error message.
    BadRequest(String),
    /// 500; the detail is logged, not echoed.
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: &'static str) -> Self {
        Self::NotFound(message)
    }

    pub fn unauthorized(message: &'static str) -> Self {
        Self::Unauthorized(message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Store(StoreError::NotFound { entity: "vendor" }) => {
                Self::NotFound("Vendor not found")
            }
            Error::Store(StoreError::NotFound { .. }) => Self::NotFound("Record not found"),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!(errors.fields))).into_response()
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            Self::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "detail": message }))).into_response()
            }
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Internal(detail) => {
                error!(detail = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

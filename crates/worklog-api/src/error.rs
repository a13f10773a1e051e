use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use worklog_db::StoreError;

use crate::token::TokenError;
use crate::validate::Violation;

/// The full failure taxonomy. Every handler and middleware failure passes
/// through `into_response` below, the single place that decides statuses
/// and wire codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input")]
    InvalidInput(Vec<Violation>),
    #[error("invalid token")]
    InvalidToken,
    #[error("access denied")]
    AccessDenied,
    #[error("username is taken")]
    UsernameTaken,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<TokenError> for ApiError {
    fn from(_: TokenError) -> Self {
        ApiError::InvalidToken
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken => ApiError::UsernameTaken,
            StoreError::AccessDenied => ApiError::AccessDenied,
            StoreError::EmptyName => ApiError::InvalidInput(vec![Violation {
                field: "name",
                rule: "min_length",
            }]),
            other => ApiError::Unexpected(other.into()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<&'a [Violation]>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, violations) = match &self {
            ApiError::InvalidInput(v) => (StatusCode::BAD_REQUEST, "invalid_input", Some(v.as_slice())),
            ApiError::InvalidToken => (StatusCode::BAD_REQUEST, "invalid_token", None),
            ApiError::AccessDenied => (StatusCode::FORBIDDEN, "access_denied", None),
            ApiError::UsernameTaken => (StatusCode::UNPROCESSABLE_ENTITY, "username_is_taken", None),
            ApiError::UserNotFound => (StatusCode::BAD_REQUEST, "user_not_found", None),
            ApiError::Unexpected(err) => {
                // Logged here, never serialized.
                error!("unexpected failure: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "unexpected_error", None)
            }
        };

        (status, Json(ErrorBody { error: code, violations })).into_response()
    }
}

/// 200 `{}` for effect-only endpoints.
pub fn empty_ok() -> Response {
    Json(json!({})).into_response()
}

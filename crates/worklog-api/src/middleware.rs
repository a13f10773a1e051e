use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::{AppState, blocking, token};

/// Username claim recovered from a verified token. Stateless: not yet
/// confirmed against a live account.
#[derive(Debug, Clone)]
pub struct Identity(pub String);

/// A live user record, confirmed by the authorization gate. Carries the
/// stored casing of the username, not the claim's.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

/// Runs on every request. No credential means the request proceeds
/// anonymously; a credential that fails verification is rejected here,
/// before anything else runs. No store access at this stage.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let raw = value.to_str().map_err(|_| ApiError::InvalidToken)?;
        let claims = token::verify(&state.jwt_secret, raw)?;
        req.extensions_mut().insert(Identity(claims.username));
    }
    Ok(next.run(req).await)
}

/// Runs only on authenticated routes. A resolved claim is never trusted as
/// proof of a live account: the user row is re-fetched, and a missing row
/// fails closed exactly like a missing identity.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Identity(claimed) = req
        .extensions()
        .get::<Identity>()
        .cloned()
        .ok_or(ApiError::AccessDenied)?;

    let user = blocking(move || Ok(state.db.get_user(&claimed)?))
        .await?
        .ok_or(ApiError::AccessDenied)?;

    req.extensions_mut().insert(CurrentUser {
        username: user.username,
    });
    Ok(next.run(req).await)
}

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::Value;

use worklog_types::api::{AuthResponse, MeResponse, SignupRequest};
use worklog_types::models::PublicUser;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::validate::{SIGNUP, validate};
use crate::{AppState, blocking, password, token};

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let violations = validate(&SIGNUP, &payload);
    if !violations.is_empty() {
        return Err(ApiError::InvalidInput(violations));
    }
    let req: SignupRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::Unexpected(e.into()))?;

    let db_state = state.clone();
    let username = blocking(move || {
        let hash = password::hash(&req.password)?;
        db_state.db.create_user(&req.username, &hash)?;
        Ok(req.username)
    })
    .await?;

    // Signup implies session: hand back a token right away.
    let access_token = token::issue(&state.jwt_secret, &username)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token,
            user: PublicUser { username },
        }),
    ))
}

/// Missing fields, unknown username, and wrong password all surface as the
/// same `user_not_found` so the endpoint leaks nothing about which accounts
/// exist.
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(username) = payload.get("username").and_then(Value::as_str).map(String::from)
    else {
        return Err(ApiError::UserNotFound);
    };
    let Some(given_password) = payload.get("password").and_then(Value::as_str).map(String::from)
    else {
        return Err(ApiError::UserNotFound);
    };

    let db_state = state.clone();
    let user = blocking(move || {
        let user = db_state
            .db
            .get_user(&username)?
            .ok_or(ApiError::UserNotFound)?;
        if !password::verify(&given_password, &user.password_hash) {
            return Err(ApiError::UserNotFound);
        }
        Ok(user)
    })
    .await?;

    let access_token = token::issue(&state.jwt_secret, &user.username)?;

    Ok(Json(AuthResponse {
        access_token,
        user: user.to_public(),
    }))
}

pub async fn me(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    Json(MeResponse {
        user: PublicUser {
            username: user.username,
        },
    })
}

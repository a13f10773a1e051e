pub mod activities;
pub mod error;
pub mod middleware;
pub mod password;
pub mod token;
pub mod users;
pub mod validate;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};

use worklog_db::Database;

use crate::error::ApiError;
use crate::middleware::{require_user, resolve_identity};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

/// The full API surface. Identity resolution wraps every route; the
/// authorization gate wraps only the routes that need a live user.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/users/signup", post(users::signup))
        .route("/api/users/signin", post(users::signin))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/api/users/me", get(users::me))
        .route(
            "/api/activities",
            get(activities::list).post(activities::create),
        )
        .route("/api/activities/{id}", delete(activities::remove))
        .route("/api/activities/{id}/logs", post(activities::create_log))
        .route(
            "/api/activities/{id}/logs/{log_id}",
            delete(activities::remove_log),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_user,
        ))
        .with_state(state.clone());

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(state, resolve_identity))
}

/// Run blocking store/hashing work off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Unexpected(e.into()))?
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::Value;

use worklog_types::api::{
    ActivitiesResponse, ActivityResponse, CreateActivityRequest, CreateLogRequest,
};

use crate::error::{ApiError, empty_ok};
use crate::middleware::CurrentUser;
use crate::validate::{CREATE_ACTIVITY, CREATE_LOG, validate};
use crate::{AppState, blocking};

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let activities =
        blocking(move || Ok(state.db.list_activities(&user.username)?)).await?;
    Ok(Json(ActivitiesResponse { activities }))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let violations = validate(&CREATE_ACTIVITY, &payload);
    if !violations.is_empty() {
        return Err(ApiError::InvalidInput(violations));
    }
    let req: CreateActivityRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::Unexpected(e.into()))?;

    let activity =
        blocking(move || Ok(state.db.create_activity(&user.username, &req.name)?)).await?;
    Ok((StatusCode::CREATED, Json(ActivityResponse { activity })))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(activity_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(move || Ok(state.db.delete_activity(&user.username, &activity_id)?)).await?;
    Ok(empty_ok())
}

pub async fn create_log(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(activity_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let violations = validate(&CREATE_LOG, &payload);
    if !violations.is_empty() {
        return Err(ApiError::InvalidInput(violations));
    }
    let req: CreateLogRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::Unexpected(e.into()))?;

    let activity = blocking(move || {
        Ok(state.db.create_log(
            &user.username,
            &activity_id,
            req.summary.as_deref(),
            req.date,
            req.duration,
        )?)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(ActivityResponse { activity })))
}

pub async fn remove_log(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((activity_id, log_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let activity =
        blocking(move || Ok(state.db.delete_log(&user.username, &activity_id, &log_id)?))
            .await?;
    Ok(Json(ActivityResponse { activity }))
}

use serde::{Deserialize, Serialize};

use crate::models::{ActivityView, PublicUser};

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: PublicUser,
}

// -- Activities --

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub summary: Option<String>,
    pub date: i64,
    pub duration: i64,
}

#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityView>,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub activity: ActivityView,
}

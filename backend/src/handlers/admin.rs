//! Admin back-office: application review listing, aggregate stats, and the
//! user directory. Every route here sits behind the `auth_admin` layer.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use crate::{
    error::AppError,
    repositories::{application as application_repo, stats as stats_repo, user as user_repo},
    state::AppState,
};

const USER_LIST_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ApplicationListQuery {
    /// `desc` sorts newest first.
    pub order: Option<String>,
    /// Legacy alias for `order=desc`.
    pub reverse: Option<String>,
}

impl ApplicationListQuery {
    fn newest_first(&self) -> bool {
        self.order.as_deref() == Some("desc") || self.reverse.as_deref() == Some("true")
    }
}

/// `GET /api/admin/applications` — all applications joined with internship
/// and applicant; deleted internships appear as placeholders.
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Json<Value>, AppError> {
    let applications = application_repo::list_all(&state.pool, query.newest_first())
        .await
        .map_err(AppError::from)?;
    Ok(Json(json!({ "applications": applications })))
}

/// `GET /api/admin/stats` — aggregate counts for the dashboard.
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let payload = stats_repo::compute(&state.pool)
        .await
        .map_err(AppError::from)?;
    Ok(Json(json!({ "success": true, "data": payload })))
}

/// `GET /api/users` — the newest registered users.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let users = user_repo::list_recent(&state.pool, USER_LIST_LIMIT)
        .await
        .map_err(AppError::from)?;
    Ok(Json(json!({
        "count": users.len(),
        "data": users,
    })))
}

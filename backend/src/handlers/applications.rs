//! Application submission, the applicant's own listing, and the admin
//! status transition.

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::application::{Application, ApplicationStatus, CreateApplicationRequest, UpdateStatusRequest},
    models::user::User,
    repositories::application as application_repo,
    state::AppState,
};

/// `POST /api/applications` — submit an application as the resolved user.
/// At most one application per (applicant, internship) pair; the store's
/// uniqueness constraint arbitrates concurrent submissions.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateApplicationRequest>,
) -> Result<Json<Value>, AppError> {
    let internship_id = payload
        .internship_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("internshipId is required".to_string()))?;

    let application = Application::new(
        internship_id,
        user.id.clone(),
        payload.name.unwrap_or(user.name),
        payload.email.unwrap_or(user.email),
        payload.resume_link,
        payload.message,
    );

    match application_repo::insert(&state.pool, &application).await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "application": application,
        }))),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
            AppError::Conflict("You have already applied to this internship".to_string()),
        ),
        Err(err) => Err(err.into()),
    }
}

/// `GET /api/applications` — the caller's applications, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let applications = application_repo::list_by_applicant(&state.pool, &user.id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(json!({ "applications": applications })))
}

/// `GET /api/applications/{id}` — admin-only joined view of one record.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let application = application_repo::find_view_by_id(&state.pool, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;
    Ok(Json(json!({ "application": application })))
}

/// `PATCH /api/applications/{id}` — admin-only status transition.
///
/// Idempotent: re-applying the current status succeeds and returns the same
/// record. A decided application cannot be reopened to pending.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status = payload
        .status
        .as_deref()
        .and_then(ApplicationStatus::parse)
        .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?;

    let current = application_repo::find_by_id(&state.pool, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    if !current.status.allows(status) {
        return Err(AppError::Conflict(
            "Application has already been decided".to_string(),
        ));
    }

    let updated = application_repo::set_status(&state.pool, &id, status)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    Ok(Json(json!({ "application": updated })))
}

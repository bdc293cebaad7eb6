//! Public internship listings and the admin-only create/delete operations.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    error::AppError,
    middleware::auth::resolve_user,
    models::internship::{CreateInternship, Internship},
    models::user::User,
    repositories::internship as internship_repo,
    state::AppState,
};

/// Create/delete share a route path with the public listing, so the admin
/// gate lives in the handler: resolve the caller once and require the
/// `admin` role.
async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let user = resolve_user(headers, &state.pool, &state.config.session_secret)
        .await
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;
    if !user.is_admin() {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }
    Ok(user)
}

const FEATURED_LIMIT: i64 = 3;

/// `GET /api/internships` — all postings, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let internships = internship_repo::list_all(&state.pool)
        .await
        .map_err(AppError::from)?;
    Ok(Json(json!({
        "count": internships.len(),
        "data": internships,
    })))
}

/// `GET /api/internships/featured` — the newest three postings.
pub async fn featured(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let internships = internship_repo::list_featured(&state.pool, FEATURED_LIMIT)
        .await
        .map_err(AppError::from)?;
    Ok(Json(json!({
        "count": internships.len(),
        "data": internships,
    })))
}

/// `POST /api/internships` — admin-only. Accepts a single posting or an
/// array of postings (seed payloads); postings sharing a title with the
/// batch replace the existing rows.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_admin(&state, &headers).await?;

    let payloads: Vec<CreateInternship> = if body.is_array() {
        serde_json::from_value(body)
    } else {
        serde_json::from_value(body).map(|single| vec![single])
    }
    .map_err(|_| {
        AppError::BadRequest("Missing required fields: title, company, description".to_string())
    })?;

    if payloads.is_empty() {
        return Err(AppError::BadRequest("Empty payload".to_string()));
    }
    for payload in &payloads {
        payload.validate()?;
    }

    let internships: Vec<Internship> = payloads
        .into_iter()
        .map(Internship::from_payload)
        .collect();
    let inserted = internship_repo::replace_many(&state.pool, &internships)
        .await
        .map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "inserted": inserted,
            "data": internships,
        })),
    ))
}

/// `DELETE /api/internships/{id}` — admin-only.
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    require_admin(&state, &headers).await?;

    let deleted = internship_repo::delete_by_id(&state.pool, &id)
        .await
        .map_err(AppError::from)?;
    if !deleted {
        return Err(AppError::NotFound("Not found".to_string()));
    }
    Ok(Json(json!({ "ok": true })))
}

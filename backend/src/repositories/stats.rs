//! Aggregate counts for the admin dashboard.

use crate::db::connection::DbPool;
use crate::models::application::ApplicationStatus;
use crate::repositories::{application as application_repo, internship as internship_repo, user as user_repo};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsPayload {
    pub total_internships: i64,
    pub total_applications: i64,
    pub total_users: i64,
    /// Users whose accounts were created in the last 30 days.
    pub active_users: i64,
    pub unique_applicants: i64,
    pub pending_applications: i64,
    pub updated_at: DateTime<Utc>,
}

pub async fn compute(pool: &DbPool) -> Result<StatsPayload, sqlx::Error> {
    let thirty_days_ago = Utc::now() - Duration::days(30);

    let total_internships = internship_repo::count(pool).await?;
    let total_applications = application_repo::count(pool).await?;
    let total_users = user_repo::count(pool).await?;
    let active_users = user_repo::count_created_since(pool, thirty_days_ago).await?;
    let unique_applicants = application_repo::count_distinct_applicants(pool).await?;
    let pending_applications =
        application_repo::count_by_status(pool, ApplicationStatus::Pending).await?;

    Ok(StatsPayload {
        total_internships,
        total_applications,
        total_users,
        active_users,
        unique_applicants,
        pending_applications,
        updated_at: Utc::now(),
    })
}

//! Repository functions for applications, including the joined views the
//! applicant and admin listings are built from.

use crate::db::connection::DbPool;
use crate::models::application::{
    AdminApplicationView, Application, ApplicationStatus, ApplicationView,
};
use crate::models::internship::InternshipSummary;
use crate::models::user::UserResponse;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(FromRow)]
struct JoinedRow {
    id: String,
    internship_id: String,
    name: String,
    email: String,
    resume_link: Option<String>,
    message: Option<String>,
    status: ApplicationStatus,
    created_at: DateTime<Utc>,
    i_id: Option<String>,
    i_title: Option<String>,
    i_company: Option<String>,
    u_id: Option<String>,
    u_name: Option<String>,
    u_email: Option<String>,
    u_role: Option<String>,
    u_image: Option<String>,
}

const JOINED_SELECT: &str = "SELECT a.id, a.internship_id, a.name, a.email, a.resume_link, \
     a.message, a.status, a.created_at, \
     i.id AS i_id, i.title AS i_title, i.company AS i_company, \
     u.id AS u_id, u.name AS u_name, u.email AS u_email, LOWER(u.role) AS u_role, u.image AS u_image \
     FROM applications a \
     LEFT JOIN internships i ON i.id = a.internship_id \
     LEFT JOIN users u ON u.id = a.applicant_id";

impl JoinedRow {
    fn internship(&self) -> Option<InternshipSummary> {
        match (&self.i_id, &self.i_title, &self.i_company) {
            (Some(id), Some(title), Some(company)) => Some(InternshipSummary {
                id: id.clone(),
                title: title.clone(),
                company: company.clone(),
            }),
            _ => None,
        }
    }

    fn into_view(self) -> ApplicationView {
        let internship = self.internship();
        ApplicationView {
            id: self.id,
            internship,
            name: self.name,
            email: self.email,
            resume_link: self.resume_link,
            message: self.message,
            status: self.status,
            created_at: self.created_at,
        }
    }

    fn into_admin_view(self) -> AdminApplicationView {
        // The back-office always shows an internship cell, so a deleted
        // posting becomes a placeholder instead of an empty column.
        let internship = self
            .internship()
            .or_else(|| Some(InternshipSummary::deleted(&self.internship_id)));
        let applicant = match (self.u_id, self.u_name, self.u_email) {
            (Some(id), Some(name), Some(email)) => Some(UserResponse {
                id,
                name,
                email,
                role: self.u_role.unwrap_or_else(|| "user".to_string()),
                image: self.u_image,
            }),
            _ => None,
        };
        AdminApplicationView {
            id: self.id,
            internship,
            applicant,
            name: self.name,
            email: self.email,
            resume_link: self.resume_link,
            message: self.message,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Inserts a new application. A unique violation on
/// `(applicant_id, internship_id)` means the applicant already applied;
/// callers translate that into a conflict response.
pub async fn insert(pool: &DbPool, application: &Application) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO applications \
         (id, internship_id, applicant_id, name, email, resume_link, message, status, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&application.id)
    .bind(&application.internship_id)
    .bind(&application.applicant_id)
    .bind(&application.name)
    .bind(&application.email)
    .bind(&application.resume_link)
    .bind(&application.message)
    .bind(application.status.as_str())
    .bind(application.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_view_by_id(
    pool: &DbPool,
    id: &str,
) -> Result<Option<AdminApplicationView>, sqlx::Error> {
    let row = sqlx::query_as::<_, JoinedRow>(&format!("{} WHERE a.id = $1", JOINED_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(JoinedRow::into_admin_view))
}

pub async fn list_by_applicant(
    pool: &DbPool,
    applicant_id: &str,
) -> Result<Vec<ApplicationView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JoinedRow>(&format!(
        "{} WHERE a.applicant_id = $1 ORDER BY a.created_at DESC",
        JOINED_SELECT
    ))
    .bind(applicant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(JoinedRow::into_view).collect())
}

pub async fn list_all(
    pool: &DbPool,
    newest_first: bool,
) -> Result<Vec<AdminApplicationView>, sqlx::Error> {
    let query = if newest_first {
        format!("{} ORDER BY a.created_at DESC", JOINED_SELECT)
    } else {
        format!("{} ORDER BY a.created_at ASC", JOINED_SELECT)
    };
    let rows = sqlx::query_as::<_, JoinedRow>(&query).fetch_all(pool).await?;
    Ok(rows.into_iter().map(JoinedRow::into_admin_view).collect())
}

/// Overwrites the stored status and returns the fresh record; `None` when
/// no such application exists. Re-applying the current status is a no-op
/// update and returns the unchanged row.
pub async fn set_status(
    pool: &DbPool,
    id: &str,
    status: ApplicationStatus,
) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "UPDATE applications SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM applications")
        .fetch_one(pool)
        .await
}

pub async fn count_by_status(
    pool: &DbPool,
    status: ApplicationStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE status = $1")
        .bind(status.as_str())
        .fetch_one(pool)
        .await
}

pub async fn count_distinct_applicants(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(DISTINCT applicant_id) FROM applications")
        .fetch_one(pool)
        .await
}

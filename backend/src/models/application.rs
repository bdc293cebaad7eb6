//! Applications and their status lifecycle.

use crate::models::internship::InternshipSummary;
use crate::models::user::UserResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Status of a single application.
///
/// `Pending` is the initial state. `Accepted` and `Rejected` are decisions;
/// a decided application is never reopened back to `Pending`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Parses the wire value; `None` for anything outside the enumeration.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ApplicationStatus::Pending),
            "accepted" => Some(ApplicationStatus::Accepted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }

    /// Whether the transition `self -> next` is exposed. Re-applying the
    /// current status is always allowed (the operation is idempotent), and
    /// admins may flip a decision, but a decided application cannot be
    /// reopened to pending.
    pub fn allows(&self, next: ApplicationStatus) -> bool {
        !(self.is_terminal() && next == ApplicationStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Stored application record with the denormalized applicant snapshot.
pub struct Application {
    pub id: String,
    pub internship_id: String,
    pub applicant_id: String,
    pub name: String,
    pub email: String,
    pub resume_link: Option<String>,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn new(
        internship_id: String,
        applicant_id: String,
        name: String,
        email: String,
        resume_link: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            internship_id,
            applicant_id,
            name,
            email,
            resume_link,
            message,
            status: ApplicationStatus::default(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Payload for `POST /api/applications`.
pub struct CreateApplicationRequest {
    #[serde(default)]
    pub internship_id: Option<String>,
    #[serde(default)]
    pub resume_link: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Optional overrides for the denormalized snapshot; the resolved user's
    /// name/email are used when absent.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
/// Payload for `PATCH /api/applications/{id}`.
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Application joined with its internship, as returned to applicants.
pub struct ApplicationView {
    pub id: String,
    pub internship: Option<InternshipSummary>,
    pub name: String,
    pub email: String,
    pub resume_link: Option<String>,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Application joined with internship and applicant, for the back-office.
pub struct AdminApplicationView {
    pub id: String,
    pub internship: Option<InternshipSummary>,
    pub applicant: Option<UserResponse>,
    pub name: String,
    pub email: String,
    pub resume_link: Option<String>,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

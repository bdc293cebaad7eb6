//! Internship postings and the payloads that create them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
/// A posted internship. Postings are created and deleted whole; updates are
/// not part of the lifecycle.
pub struct Internship {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub stipend: String,
    pub skills_required: Vec<String>,
    pub last_date_to_apply: Option<DateTime<Utc>>,
    /// Free-text contact email of the poster, intentionally not a user id.
    pub posted_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Payload for creating an internship posting.
pub struct CreateInternship {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub stipend: Option<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub last_date_to_apply: Option<DateTime<Utc>>,
    #[serde(default)]
    pub posted_by: Option<String>,
}

impl Internship {
    /// Materializes a posting from a validated payload, applying defaults.
    pub fn from_payload(payload: CreateInternship) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            company: payload.company,
            description: payload.description,
            location: payload.location.unwrap_or_else(|| "Remote".to_string()),
            stipend: payload.stipend.unwrap_or_else(|| "Unpaid".to_string()),
            skills_required: payload.skills_required,
            last_date_to_apply: payload.last_date_to_apply,
            posted_by: payload.posted_by,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Compact internship view embedded in application listings.
pub struct InternshipSummary {
    pub id: String,
    pub title: String,
    pub company: String,
}

impl InternshipSummary {
    /// Placeholder rendered when an application outlives its internship.
    pub fn deleted(internship_id: &str) -> Self {
        Self {
            id: internship_id.to_string(),
            title: "(deleted internship)".to_string(),
            company: String::new(),
        }
    }
}

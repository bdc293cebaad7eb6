//! Models that represent users, authentication payloads, and role metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Database representation of a registered account.
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name captured at signup or from the Google profile.
    pub name: String,
    /// Login email; uniqueness is enforced by the store.
    pub email: String,
    /// Role describing the user's privileges.
    pub role: UserRole,
    /// Subject id assigned by Google when the account came from OAuth.
    pub google_id: Option<String>,
    /// Optional profile image URL.
    pub image: Option<String>,
    /// Creation timestamp for auditing.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
/// Supported user roles stored in the database.
pub enum UserRole {
    /// Standard applicant role.
    #[default]
    User,
    /// Back-office administrator role.
    Admin,
}

impl UserRole {
    /// Returns the canonical lowercase representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            // tolerate legacy casings
            "User" | "USER" => Ok(UserRole::User),
            "Admin" | "ADMIN" => Ok(UserRole::Admin),
            other => Err(serde::de::Error::unknown_variant(other, &["user", "admin"])),
        }
    }
}

impl User {
    /// Constructs a new user with a freshly generated identifier.
    /// The user-facing flows never set a role; everyone starts as `user`.
    pub fn new(name: String, email: String, google_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            role: UserRole::default(),
            google_id,
            image: None,
            created_at: Utc::now(),
        }
    }

    /// Returns `true` when the user holds the `admin` role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Public-facing representation of a user returned by `/api/auth/me`.
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
            image: user.image,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Payload for `/api/auth/signup`.
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub google_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
/// Payload for `/api/auth/google`: the raw Google ID token.
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub credential: Option<String>,
}

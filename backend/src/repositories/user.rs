//! Repository functions for user records.

use crate::db::connection::DbPool;
use crate::models::user::User;
use chrono::{DateTime, Utc};

const USER_COLUMNS: &str = "id, name, email, LOWER(role) AS role, google_id, image, created_at";

pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

async fn insert(pool: &DbPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, name, email, role, google_id, image, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.role.as_str())
    .bind(&user.google_id)
    .bind(&user.image)
    .bind(user.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns the user registered under `email`, creating a fresh `user`-role
/// record on first login. The store's unique index on email arbitrates
/// concurrent first logins: losing the insert race falls back to the row
/// the winner created.
pub async fn find_or_create(
    pool: &DbPool,
    email: &str,
    name: &str,
    google_id: Option<&str>,
) -> Result<User, sqlx::Error> {
    if let Some(existing) = find_by_email(pool, email).await? {
        return Ok(existing);
    }

    let user = User::new(
        name.to_string(),
        email.to_string(),
        google_id.map(String::from),
    );
    match insert(pool, &user).await {
        Ok(()) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            find_by_email(pool, email)
                .await?
                .ok_or(sqlx::Error::RowNotFound)
        }
        Err(err) => Err(err),
    }
}

pub async fn list_recent(pool: &DbPool, limit: i64) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY created_at DESC LIMIT $1",
        USER_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

pub async fn count_created_since(
    pool: &DbPool,
    since: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1")
        .bind(since)
        .fetch_one(pool)
        .await
}

//! Repository functions for internship postings.

use crate::db::connection::DbPool;
use crate::models::internship::Internship;

pub async fn list_all(pool: &DbPool) -> Result<Vec<Internship>, sqlx::Error> {
    sqlx::query_as::<_, Internship>("SELECT * FROM internships ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_featured(pool: &DbPool, limit: i64) -> Result<Vec<Internship>, sqlx::Error> {
    sqlx::query_as::<_, Internship>(
        "SELECT * FROM internships ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Internship>, sqlx::Error> {
    sqlx::query_as::<_, Internship>("SELECT * FROM internships WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts a batch of postings, first removing any existing postings that
/// share a title with the batch. Seed payloads are replayed against the
/// store, so same-title rows are replaced instead of duplicated.
pub async fn replace_many(
    pool: &DbPool,
    internships: &[Internship],
) -> Result<usize, sqlx::Error> {
    let titles: Vec<String> = internships.iter().map(|i| i.title.clone()).collect();

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM internships WHERE title = ANY($1)")
        .bind(&titles)
        .execute(&mut *tx)
        .await?;

    for internship in internships {
        sqlx::query(
            "INSERT INTO internships \
             (id, title, company, description, location, stipend, skills_required, \
              last_date_to_apply, posted_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&internship.id)
        .bind(&internship.title)
        .bind(&internship.company)
        .bind(&internship.description)
        .bind(&internship.location)
        .bind(&internship.stipend)
        .bind(&internship.skills_required)
        .bind(internship.last_date_to_apply)
        .bind(&internship.posted_by)
        .bind(internship.created_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(internships.len())
}

/// Returns `false` when no posting with the given id exists.
pub async fn delete_by_id(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM internships WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM internships")
        .fetch_one(pool)
        .await
}

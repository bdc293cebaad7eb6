use sqlx::postgres::{PgPool, PgPoolOptions};

pub type DbPool = PgPool;

/// Builds the process-wide Postgres pool. Connections are established lazily
/// on first use and reused for the lifetime of the process; there is no
/// explicit teardown beyond process exit.
pub fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(database_url)?;
    Ok(pool)
}

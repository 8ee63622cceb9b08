use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Create the PostgreSQL connection pool and run pending migrations.
pub async fn configure_postgresql(url: &Secret<String>) -> Result<PgPool, sqlx::Error> {
    let pool = get_postgres_pool(url.expose_secret()).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

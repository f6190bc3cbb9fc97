//! Pool creation and schema migrations.
//!
//! Startup calls [`init_pool`] once, before the router is built, so no request
//! ever sees an unmigrated schema.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connect to `PostgreSQL` with at most `max_connections` and apply pending
/// migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;
    tracing::info!(max_connections, "database ready");

    Ok(pool)
}

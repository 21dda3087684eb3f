use std::str::FromStr;

use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL connection pool and brings the schema up to date.
///
/// `db_name`, when given, replaces the database named in the connection string.
pub async fn create_pool(database_url: &str, db_name: Option<&str>) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let mut options = PgConnectOptions::from_str(database_url)?;
    if let Some(name) = db_name {
        options = options.database(name);
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://foodchief.db";

/// Open the recipe store, creating the database file and applying
/// migrations as needed.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    if !sqlx::Sqlite::database_exists(database_url).await? {
        info!(database_url, "Creating database");
        sqlx::Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

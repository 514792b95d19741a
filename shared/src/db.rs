use anyhow::Result;
use bb8::Pool;
use diesel::{Connection, PgConnection};
use diesel_async::{pooled_connection::AsyncDieselConnectionManager, AsyncPgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub type DbPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Runs pending migrations on a blocking connection, then opens the async pool.
pub async fn connect(database_url: &str, migrations: EmbeddedMigrations) -> Result<DbPool> {
    info!("Running database migrations...");
    let mut conn = PgConnection::establish(database_url)?;
    conn.run_pending_migrations(migrations)
        .map_err(|e| anyhow::anyhow!("Migration error: {}", e))?;
    info!("Migrations completed successfully");

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = Pool::builder().build(config).await?;
    Ok(pool)
}

use anyhow::Result;
use sea_orm::{Database, DatabaseConnection};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;
pub type OrmConn = DatabaseConnection;

/// Schema migrations embedded from `migrations/` at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create the sqlx pool used for read views and the audit trail.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Applies pending migrations. Applied versions are recorded in
/// `_sqlx_migrations` and concurrent runners wait on an advisory lock.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    tracing::debug!(migrations = MIGRATOR.iter().count(), "schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_migration_is_embedded() {
        let first = MIGRATOR.iter().next().expect("embedded migration");
        assert_eq!(first.version, 1);
        assert_eq!(first.description, "init");
        assert!(first.sql.contains("CREATE TABLE IF NOT EXISTS cars"));
    }
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use car_dealership_api::{
    config::AppConfig,
    db::{MIGRATOR, create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,car_dealership_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;

    for migration in MIGRATOR.iter() {
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            "known migration"
        );
    }
    run_migrations(&pool).await?;

    let applied: (i64,) = sqlx::query_as("SELECT count(*) FROM _sqlx_migrations WHERE success")
        .fetch_one(&pool)
        .await?;
    tracing::info!(applied = applied.0, "migrations applied");
    Ok(())
}

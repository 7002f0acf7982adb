use crate::config::{BrokerSettings, init_database, migrate_database};

/// Run database migrations for the broker database
///
/// Connects and applies all pending migrations. It does not initialize the
/// full AppData structure.
///
/// # Returns
/// * `Ok(())` - Migrations completed successfully
/// * `Err(...)` - Connection or migration failed
pub async fn run_migrations(settings: &BrokerSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = init_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}

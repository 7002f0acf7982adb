use migration::{BrokerMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::errors::InternalError;

/// Connect to the broker database
///
/// Does NOT run migrations - call migrate_database() separately.
pub async fn init_database(database_url: &str) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to broker database: {}", database_url);

    Ok(db)
}

/// Apply all pending schema migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    BrokerMigrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("migrate_database", e))?;

    tracing::info!("Broker database migrations completed");

    Ok(())
}

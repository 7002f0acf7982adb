use std::sync::Arc;

use clap::Parser;

use template_service_broker::app_data::AppData;
use template_service_broker::cli::{self, Cli};
use template_service_broker::config::{
    BrokerSettings, LoggingConfig, SystemEnvironment, init_database, init_logging,
    migrate_database,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging(&LoggingConfig::from_env_provider(&SystemEnvironment))?;

    let cli = Cli::parse();
    let settings = BrokerSettings::from_env()?;

    if cli.is_migrate() {
        return cli::migrate::run_migrations(&settings).await;
    }

    let db = init_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, settings));

    cli::execute_command(cli, app_data).await
}

mod broker_settings;
mod config_spec;
mod database;
mod env_provider;
mod errors;
mod logging;

pub use broker_settings::BrokerSettings;
pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use database::{init_database, migrate_database};
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use errors::ApplicationError;
pub use logging::{LoggingConfig, LoggingError, init_logging};

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

/// Broker process settings, read once at startup
pub struct BrokerSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    template_namespaces: HashSet<String>,
}

impl BrokerSettings {
    /// Load settings from the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://broker.db?mode=rwc")
            .min_length(1)
            .load()?
            .value;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load()?
            .value;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("8080")
            .load()?
            .value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        // Only templates living in these namespaces are offered
        let namespaces_value = ConfigSpec::new(env_provider)
            .env_override("TEMPLATE_NAMESPACES")
            .default_value("openshift")
            .validator(ConfigSpec::validate_non_empty_list)
            .load()?
            .value;
        let template_namespaces = ConfigSpec::parse_list(&namespaces_value).into_iter().collect();

        Ok(Self {
            database_url,
            server_host,
            server_port,
            template_namespaces,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn template_namespaces(&self) -> &HashSet<String> {
        &self.template_namespaces
    }

    pub fn is_template_namespace(&self, namespace: &str) -> bool {
        self.template_namespaces.contains(namespace)
    }
}

impl fmt::Debug for BrokerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("template_namespaces", &self.template_namespaces)
            .finish()
    }
}

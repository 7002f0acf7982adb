// CLI module for serving the broker and administrative operations

pub mod grant;
pub mod migrate;
pub mod serve;
pub mod template;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Template service broker CLI
#[derive(Parser, Debug)]
#[command(name = "template-service-broker")]
#[command(about = "Open Service Broker that provisions templates", long_about = None)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the broker HTTP server
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Allow a user or group to perform a verb in a namespace
    Grant {
        /// `user:<name>` or `group:<name>`
        #[arg(long)]
        subject: String,

        /// Target namespace, or `*` for every namespace
        #[arg(long)]
        namespace: String,

        /// Verb to allow, or `*` for every verb
        #[arg(long, default_value = "create")]
        verb: String,
    },

    /// Template catalog commands
    #[command(subcommand)]
    Template(TemplateCommands),
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Register a template so it can be provisioned
    Register {
        /// Template uid, used as the catalog service id
        #[arg(long)]
        uid: String,

        /// Namespace the template lives in
        #[arg(long)]
        namespace: String,

        /// Template name
        #[arg(long)]
        name: String,
    },
}

impl Cli {
    /// Whether the command only needs a migrated database and no AppData
    pub fn is_migrate(&self) -> bool {
        matches!(self.command, Some(Commands::Migrate))
    }
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `app_data` - Application data containing all stores and settings
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    cli: Cli,
    app_data: Arc<AppData>,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            serve::run_server(app_data).await?;
        }
        Commands::Migrate => {
            // Migrations already ran while building AppData
            tracing::info!("Database is up to date");
        }
        Commands::Grant {
            subject,
            namespace,
            verb,
        } => {
            grant::add_grant(&app_data, &subject, &namespace, &verb).await?;
        }
        Commands::Template(TemplateCommands::Register {
            uid,
            namespace,
            name,
        }) => {
            template::register_template(&app_data, &uid, &namespace, &name).await?;
        }
    }

    Ok(())
}

//! # Bot Provisioning CLI
//!
//! Provisions the Azure resources a bot project needs through a two-page
//! wizard: choose a subscription, resource group name and region, review the
//! planned resources, then hand the request to the publish management API.
//! An existing publish configuration can be imported instead.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bot_provision::platform::api::{ManagementApiClient, PublishKind};
//! use bot_provision::wizard::{WizardContext, WizardController};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let context = WizardContext::new("my-bot", PublishKind::AzurePublish);
//! let client = Arc::new(ManagementApiClient::with_url("http://localhost:5000")?.with_context(&context));
//! let mut wizard = WizardController::new(context, client.clone(), client);
//!
//! wizard.open().await?;
//! wizard.change_subscription("00000000-0000-0000-0000-000000000000").await?;
//! wizard.set_host_name("contoso-bot")?;
//! wizard.select_location("westus")?;
//! wizard.next().await?;
//! let submission = wizard.done().await?;
//! println!("started job {}", submission.job.id);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod platform;
pub mod wizard;

// Re-export commonly used types and functions
pub use error::{ProvisionError, Result};
pub use wizard::{WizardContext, WizardController};
use cli::Commands;
use config::types::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn run_command(command: Commands, config: &Config, json: bool) -> Result<()> {
    match command {
        Commands::Provision {
            project,
            publish_kind,
            subscription,
            hostname,
            location,
            luis_location,
            exclude,
            yes,
        } => {
            let unattended = match (yes, subscription, hostname, location) {
                (true, Some(subscription), Some(hostname), Some(location)) => {
                    Some(handlers::UnattendedOptions {
                        subscription,
                        hostname,
                        location,
                        luis_location,
                        exclude,
                    })
                }
                (true, ..) => {
                    return Err(ProvisionError::InvalidInput(
                        "--yes needs --subscription, --hostname and --location".to_string(),
                    ));
                }
                _ => None,
            };
            let args = handlers::ProvisionArgs {
                project,
                publish_kind: publish_kind.map(Into::into),
                unattended,
            };
            handlers::handle_provision(config, args, json).await
        }
        Commands::Import { file, project } => {
            handlers::handle_import(config, &file, project.as_deref()).await
        }
        Commands::Plan {
            hostname,
            project,
            publish_kind,
        } => {
            handlers::handle_plan(
                config,
                &hostname,
                project.as_deref(),
                publish_kind.map(Into::into),
                json,
            )
            .await
        }
        Commands::Regions => handlers::handle_regions(json),
        Commands::Auth { command } => handlers::handle_auth(command),
        Commands::Project { command } => handlers::handle_project(command, json),
    }
}

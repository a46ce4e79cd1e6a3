use crate::platform::api::types::PublishKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prov-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Provision Azure resources for a bot project")]
#[command(long_about = "Walks through choosing a subscription, resource group name and region, previews the Azure resources a bot needs, and starts provisioning them. Existing publish configurations can be imported instead.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format where applicable
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Provision new Azure resources for a bot project
    Provision {
        /// Bot project id (defaults to the selected project)
        #[arg(long, value_name = "ID")]
        project: Option<String>,

        /// Publish target kind
        #[arg(long = "type", value_enum, value_name = "KIND")]
        publish_kind: Option<PublishKindArg>,

        /// Subscription id (non-interactive)
        #[arg(long)]
        subscription: Option<String>,

        /// Name of the new resource group (non-interactive)
        #[arg(long)]
        hostname: Option<String>,

        /// Deploy region id or name (non-interactive)
        #[arg(long)]
        location: Option<String>,

        /// LUIS authoring region, when the deploy region has none
        #[arg(long)]
        luis_location: Option<String>,

        /// Optional resource keys to leave out
        #[arg(long, value_delimiter = ',', value_name = "KEY")]
        exclude: Vec<String>,

        /// Run without prompts using the flags above
        #[arg(short, long, requires_all = ["subscription", "hostname", "location"])]
        yes: bool,
    },

    /// Import an existing publish configuration
    Import {
        /// JSON publish configuration file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Bot project id (defaults to the selected project)
        #[arg(long, value_name = "ID")]
        project: Option<String>,
    },

    /// Preview the resources that would be created for a host name
    Plan {
        /// Name of the new resource group
        #[arg(long)]
        hostname: String,

        /// Bot project id (defaults to the selected project)
        #[arg(long, value_name = "ID")]
        project: Option<String>,

        /// Publish target kind
        #[arg(long = "type", value_enum, value_name = "KIND")]
        publish_kind: Option<PublishKindArg>,
    },

    /// List LUIS authoring and prediction regions
    Regions,

    /// Manage stored credentials
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Manage the selected bot project
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Store management API credentials
    Login {
        /// Management API bearer token
        #[arg(long, env = "BOTPROV_TOKEN", hide_env_values = true)]
        token: String,

        /// Directory graph token used for app registration
        #[arg(long, env = "BOTPROV_GRAPH_TOKEN", hide_env_values = true)]
        graph_token: Option<String>,

        /// Display name of the signed-in user
        #[arg(long)]
        user: Option<String>,

        /// Email of the signed-in user
        #[arg(long)]
        email: Option<String>,

        /// Seconds until the tokens expire
        #[arg(long, value_name = "SECS")]
        expires_in: Option<u64>,
    },

    /// Remove stored credentials
    Logout,

    /// Show authentication status
    Status,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Select the bot project used by default
    Set {
        /// Bot project id
        #[arg(value_name = "ID")]
        id: String,

        /// Human-readable project name
        #[arg(long)]
        name: Option<String>,

        /// Default publish target kind for this project
        #[arg(long = "type", value_enum, value_name = "KIND")]
        publish_kind: Option<PublishKindArg>,
    },

    /// Show the selected project
    Show,

    /// Forget the selected project
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PublishKindArg {
    #[value(name = "azurePublish")]
    AzurePublish,
    #[value(name = "azureFunctionsPublish")]
    AzureFunctionsPublish,
}

impl From<PublishKindArg> for PublishKind {
    fn from(arg: PublishKindArg) -> Self {
        match arg {
            PublishKindArg::AzurePublish => PublishKind::AzurePublish,
            PublishKindArg::AzureFunctionsPublish => PublishKind::AzureFunctionsPublish,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_non_interactive_provision_parses() {
        let cli = Cli::try_parse_from([
            "prov-ctl",
            "provision",
            "--project",
            "p1",
            "--type",
            "azureFunctionsPublish",
            "--subscription",
            "sub-1",
            "--hostname",
            "contoso",
            "--location",
            "eastus",
            "--exclude",
            "appInsights,cosmosDb",
            "--yes",
        ])
        .unwrap();

        match cli.command {
            Commands::Provision {
                publish_kind,
                exclude,
                yes,
                ..
            } => {
                assert_eq!(publish_kind, Some(PublishKindArg::AzureFunctionsPublish));
                assert_eq!(exclude, vec!["appInsights", "cosmosDb"]);
                assert!(yes);
            }
            _ => panic!("expected provision"),
        }
    }

    #[test]
    fn test_yes_requires_destination() {
        let result = Cli::try_parse_from(["prov-ctl", "provision", "--yes"]);
        assert!(result.is_err());
    }
}
